//! Daily entry: ratings grid state, the draft record and the form view.

mod draft;
mod form;
mod ratings;

pub use draft::{EntryDraft, MEDICATION_ROWS};
pub use form::EntryForm;
pub use ratings::{metric_color, Period, RatingsGrid};
