use std::sync::Arc;

use tracing::info;

use devconnector_auth::{AuthError, AuthService};
use devconnector_core::{CurrentUser, ServiceError};
use devconnector_kv::KVStore;
use devconnector_store::{DeleteBatch, DocOps};
use devconnector_validate::{
    validate_education, validate_experience, validate_profile, EducationInput, ExperienceInput,
    ProfileInput,
};

use crate::model::{Education, Experience, Profile, ProfileView, UserRef};

fn no_profile() -> ServiceError {
    ServiceError::not_found("noprofile", "There is no profile for this user")
}

/// Profile operations. Owner identity always comes from the session.
pub struct ProfileService {
    profiles: DocOps<Profile>,
    auth: Arc<AuthService>,
}

impl ProfileService {
    pub fn new(kv: Arc<dyn KVStore>, auth: Arc<AuthService>) -> Arc<Self> {
        Arc::new(Self {
            profiles: DocOps::new(kv),
            auth,
        })
    }

    /// Expand the owner id into name and avatar.
    fn populate(&self, profile: Profile) -> Result<ProfileView, ServiceError> {
        let user = match self.auth.get_user(&profile.user) {
            Ok(u) => UserRef {
                id: u.id,
                name: u.name,
                avatar: u.avatar,
            },
            Err(AuthError::UserNotFound) => UserRef {
                id: profile.user.clone(),
                ..UserRef::default()
            },
            Err(e) => return Err(e.into()),
        };
        Ok(profile.populate(user))
    }

    fn owned(&self, user: &CurrentUser) -> Result<Profile, ServiceError> {
        self.profiles.get_or(&user.id, no_profile)
    }

    pub fn current(&self, user: &CurrentUser) -> Result<ProfileView, ServiceError> {
        self.populate(self.owned(user)?)
    }

    /// Every profile. An empty collection is reported as not found.
    pub fn all(&self) -> Result<Vec<ProfileView>, ServiceError> {
        let profiles = self.profiles.list()?;
        if profiles.is_empty() {
            return Err(ServiceError::not_found("noprofile", "There are no profiles"));
        }
        profiles.into_iter().map(|p| self.populate(p)).collect()
    }

    pub fn by_handle(&self, handle: &str) -> Result<ProfileView, ServiceError> {
        let profile = self.profiles.find(|p| p.handle == handle)?.ok_or_else(no_profile)?;
        self.populate(profile)
    }

    pub fn by_user(&self, user_id: &str) -> Result<ProfileView, ServiceError> {
        self.populate(self.profiles.get_or(user_id, no_profile)?)
    }

    /// Create or update the caller's profile.
    ///
    /// A handle held by another user's profile is rejected, both on create
    /// and on update.
    pub fn upsert(&self, user: &CurrentUser, input: ProfileInput) -> Result<ProfileView, ServiceError> {
        validate_profile(&input).into_result()?;

        let handle = input.handle.trim().to_string();
        if self
            .profiles
            .find(|p| p.handle == handle && p.user != user.id)?
            .is_some()
        {
            return Err(ServiceError::bad_request("handle", "That handle already exists"));
        }

        let saved = match self.profiles.get(&user.id)? {
            Some(mut existing) => {
                existing.apply(input);
                info!(user_id = %user.id, handle = %handle, "updated profile");
                self.profiles.save(existing)?
            }
            None => {
                info!(user_id = %user.id, handle = %handle, "created profile");
                self.profiles.save_new(Profile::new(&user.id, input))?
            }
        };
        self.populate(saved)
    }

    /// Prepend an experience entry to the caller's profile.
    pub fn add_experience(&self, user: &CurrentUser, input: ExperienceInput) -> Result<ProfileView, ServiceError> {
        validate_experience(&input).into_result()?;

        let mut profile = self.owned(user)?;
        profile.experience.insert(0, Experience::from(input));
        self.populate(self.profiles.save(profile)?)
    }

    /// Prepend an education entry to the caller's profile.
    pub fn add_education(&self, user: &CurrentUser, input: EducationInput) -> Result<ProfileView, ServiceError> {
        validate_education(&input).into_result()?;

        let mut profile = self.owned(user)?;
        profile.education.insert(0, Education::from(input));
        self.populate(self.profiles.save(profile)?)
    }

    pub fn delete_experience(&self, user: &CurrentUser, exp_id: &str) -> Result<ProfileView, ServiceError> {
        let mut profile = self.owned(user)?;
        let index = profile
            .experience
            .iter()
            .position(|e| e.id == exp_id)
            .ok_or_else(|| ServiceError::not_found("experiencenotfound", "Experience not found"))?;
        profile.experience.remove(index);
        self.populate(self.profiles.save(profile)?)
    }

    pub fn delete_education(&self, user: &CurrentUser, edu_id: &str) -> Result<ProfileView, ServiceError> {
        let mut profile = self.owned(user)?;
        let index = profile
            .education
            .iter()
            .position(|e| e.id == edu_id)
            .ok_or_else(|| ServiceError::not_found("educationnotfound", "Education not found"))?;
        profile.education.remove(index);
        self.populate(self.profiles.save(profile)?)
    }

    /// Delete the caller's profile and account in one transaction.
    pub fn delete_account(&self, user: &CurrentUser) -> Result<(), ServiceError> {
        let profile = DeleteBatch::new().with::<Profile>(&user.id);
        self.auth.delete_user_with(&user.id, profile)?;
        info!(user_id = %user.id, "deleted account");
        Ok(())
    }
}
