use crate::protocol::cesu8::utf8_to_cesu8_and_utf8_tail;
use crate::{HdbError, HdbResult};
use std::io::Read;
use std::sync::{Arc, Mutex};

const IS_NULL: u8 = 0b_0000_0001;
const DATA_INCLUDED: u8 = 0b_0000_0010;
const LAST_DATA: u8 = 0b_0000_0100;

/// The option bits that accompany each chunk of a streamed LOB.
#[derive(Clone, Copy, Default)]
pub struct LobInOptions(u8);

impl LobInOptions {
    pub(crate) fn new(data_included: bool, last_data: bool) -> Self {
        let mut bits = 0;
        if data_included {
            bits |= DATA_INCLUDED;
        }
        if last_data {
            bits |= LAST_DATA;
        }
        Self(bits)
    }

    /// The chunk represents a NULL value.
    pub fn is_null(self) -> bool {
        (self.0 & IS_NULL) != 0
    }

    /// The chunk carries payload bytes.
    pub fn is_data_included(self) -> bool {
        (self.0 & DATA_INCLUDED) != 0
    }

    /// The chunk is the last one of the stream.
    pub fn is_last_data(self) -> bool {
        (self.0 & LAST_DATA) != 0
    }
}

impl std::fmt::Debug for LobInOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "(")?;
        if self.is_null() {
            write!(f, " IS_NULL")?;
        }
        if self.is_data_included() {
            write!(f, " DATA_INCLUDED")?;
        }
        if self.is_last_data() {
            write!(f, " LAST_DATA")?;
        }
        write!(f, " )")
    }
}

/// An in-progress streaming upload of a large object.
///
/// Conversion creates a descriptor for every LOB-typed parameter and pulls
/// the first chunk (see [`fetch_next`](LobInDescr::fetch_next)). If the
/// whole payload fit into that chunk, [`LobInOptions::is_last_data`] holds;
/// otherwise the protocol layer owes the server one or more follow-up
/// messages with additional chunks, pulled with further `fetch_next` calls.
///
/// For the character LOB types the source must deliver UTF-8; each chunk is
/// transcoded to CESU-8, and bytes that would split a character are held
/// back until the next chunk.
pub struct LobInDescr {
    rdr: Arc<Mutex<dyn Read + Send>>,
    needs_cesu8: bool,
    utf8_tail: Vec<u8>,
    chunk: Vec<u8>,
    position: u64,
    opts: LobInOptions,
}

impl LobInDescr {
    pub(crate) fn new(rdr: Arc<Mutex<dyn Read + Send>>, needs_cesu8: bool) -> Self {
        Self {
            rdr,
            needs_cesu8,
            utf8_tail: Vec::new(),
            chunk: Vec::new(),
            position: 0,
            opts: LobInOptions::default(),
        }
    }

    /// Pulls the next chunk of at most `chunk_size` bytes from the source
    /// and updates the option bits.
    ///
    /// # Errors
    ///
    /// `HdbError::Io` if the source fails; `HdbError::Cesu8` if a character
    /// LOB source does not deliver valid UTF-8 or ends in the middle of a
    /// character.
    pub fn fetch_next(&mut self, chunk_size: usize) -> HdbResult<()> {
        let mut raw = std::mem::take(&mut self.utf8_tail);
        let mut filled = raw.len();
        raw.resize(chunk_size.max(filled), 0);
        let mut found_end = false;
        {
            let mut rdr = self.rdr.lock()?;
            while filled < raw.len() {
                let n = rdr.read(&mut raw[filled..])?;
                if n == 0 {
                    found_end = true;
                    break;
                }
                filled += n;
            }
        }
        raw.truncate(filled);

        if self.needs_cesu8 {
            if found_end {
                // the stream has to end at a character boundary
                let s = std::str::from_utf8(&raw).map_err(|_| HdbError::Cesu8)?;
                self.chunk = cesu8::to_cesu8(s).to_vec();
            } else {
                let (payload, tail) = utf8_to_cesu8_and_utf8_tail(raw)?;
                self.chunk = payload;
                self.utf8_tail = tail;
            }
        } else {
            self.chunk = raw;
        }

        self.position += self.chunk.len() as u64;
        self.opts = LobInOptions::new(!self.chunk.is_empty(), found_end);
        Ok(())
    }

    /// The option bits of the most recently fetched chunk.
    pub fn opts(&self) -> LobInOptions {
        self.opts
    }

    /// The payload of the most recently fetched chunk, in transport
    /// encoding.
    pub fn chunk(&self) -> &[u8] {
        &self.chunk
    }

    /// Total number of payload bytes fetched so far.
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl std::fmt::Debug for LobInDescr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("LobInDescr")
            .field("needs_cesu8", &self.needs_cesu8)
            .field("position", &self.position)
            .field("chunk_len", &self.chunk.len())
            .field("opts", &self.opts)
            .finish()
    }
}
