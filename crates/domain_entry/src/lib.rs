//! Entry Domain
//!
//! The stored entity of this workspace and everything needed to query it:
//!
//! - `entry`: the `Entry` entity and the `CategoryTotal` projection
//! - `codecs`: attribute codecs between stored text columns and domain values
//! - `metamodel`: `QEntry` paths and the `QCategoryTotal` constructor
//! - `ports`: the `EntryStore` persistence port

pub mod entry;
pub mod codecs;
pub mod metamodel;
pub mod ports;

pub use entry::{CategoryTotal, Entry};
pub use codecs::{CustomNumberCodec, EntryIdCodec, CUSTOM_NUMBER, ENTRY_ID};
pub use metamodel::{QCategoryTotal, QEntry, ENTRY, ENTRY_TABLE};
pub use ports::EntryStore;
