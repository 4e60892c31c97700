mod entry;
mod profile;

pub use entry::{Education, Experience};
pub use profile::{split_skills, Profile, ProfileView, Social, UserRef};
