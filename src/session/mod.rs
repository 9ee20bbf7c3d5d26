// Session Module
//
// The single active catalog handle and the schema scope resolved for it.

mod session;

pub use self::session::{Session, SessionSnapshot};
