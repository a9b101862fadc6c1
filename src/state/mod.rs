pub mod dispatcher;
pub mod inbox;
pub mod notify;
pub mod registry;
pub mod roster;
pub mod stamp;

pub use dispatcher::{FormDone, FormKind, Mutation, Outcome, Refresh};
pub use inbox::Inbox;
pub use notify::{Level, Notice, Notices};
pub use registry::GigBoard;
pub use roster::Roster;
