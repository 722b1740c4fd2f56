mod create;

pub use create::CreateUserInput;

use std::ops::Deref;

use crate::repository::{self, FindType, User};

#[derive(Clone)]
pub struct Command {
    state: foodgram_shared::State,
    pub subscription: crate::subscription::Command,
}

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: foodgram_shared::State) -> Self {
        Self {
            subscription: crate::subscription::Command(state.clone()),
            state,
        }
    }

    pub async fn load(&self, id: i64) -> foodgram_shared::Result<Option<User>> {
        repository::find(&self.read_db, FindType::Id(id)).await
    }

    pub async fn find(&self, find_type: FindType) -> foodgram_shared::Result<Option<User>> {
        repository::find(&self.read_db, find_type).await
    }
}
