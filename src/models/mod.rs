mod limit;
mod purchase;

pub(crate) use limit::{PersonLimit, PERSONAL_KEY};
pub(crate) use purchase::Purchase;
