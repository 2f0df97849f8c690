mod entry;
pub use entry::Entry;

mod history;
pub use history::History;

mod not_found;
pub use not_found::NotFound;

mod status;
pub use status::Status;
