//! User service: registration runs through the validation aspect and an
//! email-uniqueness rule; lookups are plain pass-through.

use std::sync::Arc;

use merx_core::aspects::{AspectPlan, AspectSpec, Invocation, Pipeline};
use merx_core::error::OpResult;
use merx_core::results::{ActionResult, DataResult};
use merx_core::rules;

use crate::data_access::Repository;
use crate::entities::User;
use crate::messages;

const SERVICE: &str = "UserService";

/// Public contract of the user service.
pub trait Users: Send + Sync {
    fn add(&self, user: &User) -> OpResult<ActionResult>;
    fn get_by_mail(&self, email: &str) -> OpResult<DataResult<User>>;
    fn get_list(&self) -> OpResult<DataResult<Vec<User>>>;
}

pub struct UserService {
    users: Arc<dyn Repository<User>>,
    pipeline: Arc<Pipeline>,
    add_plan: AspectPlan,
}

impl UserService {
    pub fn new(users: Arc<dyn Repository<User>>, pipeline: Arc<Pipeline>) -> Self {
        UserService {
            users,
            pipeline,
            add_plan: AspectPlan::new([AspectSpec::Validation]),
        }
    }

    fn check_email_is_free(&self, email: &str) -> OpResult<Option<ActionResult>> {
        let existing = self.users.get(&|u: &User| u.email == email)?;
        Ok(existing.map(|_| ActionResult::fail(messages::USER_EMAIL_ALREADY_EXISTS)))
    }
}

impl Users for UserService {
    fn add(&self, user: &User) -> OpResult<ActionResult> {
        let invocation = Invocation::new(SERVICE, "add").arg(user)?.subject(user);
        self.pipeline.execute(&self.add_plan, &invocation, &mut || {
            if let Some(failure) =
                rules::run(vec![Box::new(|| self.check_email_is_free(&user.email))])?
            {
                return Ok(failure);
            }
            self.users.add(user)?;
            Ok(ActionResult::ok_with(messages::USER_ADDED))
        })
    }

    fn get_by_mail(&self, email: &str) -> OpResult<DataResult<User>> {
        let found = self.users.get(&|u: &User| u.email == email)?;
        Ok(DataResult::ok_maybe(found))
    }

    fn get_list(&self) -> OpResult<DataResult<Vec<User>>> {
        Ok(DataResult::ok(self.users.get_list(None)?))
    }
}
