mod lob_in_descr;

pub use lob_in_descr::{LobInDescr, LobInOptions};
