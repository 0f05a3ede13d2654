mod account;
mod console;
mod help;
mod session;
mod store;

pub use self::{
    account::Pin,
    console::Console,
    session::Session,
    store::Store,
};
