//! Account service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserCommand, UserQuery, UserRepository, map_repository_error};
use crate::domain::{Error, Nickname, User, UserId, UserProfile};

/// Account service implementing [`UserCommand`] and [`UserQuery`].
#[derive(Clone)]
pub struct UserService<U> {
    users: Arc<U>,
}

impl<U> UserService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U: UserRepository> UserService<U> {
    async fn load(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(|err| map_repository_error("user", err))?
            .filter(|user| !user.is_deleted())
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }

    async fn nickname_taken(&self, nickname: &Nickname) -> Result<bool, Error> {
        self.users
            .exists_by_nickname(nickname.as_ref())
            .await
            .map_err(|err| map_repository_error("user", err))
    }
}

#[async_trait]
impl<U: UserRepository> UserCommand for UserService<U> {
    async fn update_profile(
        &self,
        requester: &UserId,
        nickname: String,
        profile: UserProfile,
    ) -> Result<User, Error> {
        let nickname = Nickname::new(nickname)
            .map_err(|err| Error::invalid_request(format!("invalid nickname: {err}")))?;
        let mut user = self.load(requester).await?;
        if user.nickname() != &nickname && self.nickname_taken(&nickname).await? {
            return Err(Error::conflict(format!("nickname `{nickname}` is taken")));
        }
        user.update_profile(nickname, profile);
        self.users
            .save(&user)
            .await
            .map_err(|err| map_repository_error("user", err))?;
        Ok(user)
    }

    async fn delete_account(&self, requester: &UserId) -> Result<(), Error> {
        let mut user = self.load(requester).await?;
        user.soft_delete();
        self.users
            .save(&user)
            .await
            .map_err(|err| map_repository_error("user", err))
    }
}

#[async_trait]
impl<U: UserRepository> UserQuery for UserService<U> {
    async fn get_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.load(user_id).await
    }

    async fn is_nickname_available(&self, nickname: &str) -> Result<bool, Error> {
        match Nickname::new(nickname) {
            Ok(nickname) => Ok(!self.nickname_taken(&nickname).await?),
            Err(_) => Ok(false),
        }
    }
}
