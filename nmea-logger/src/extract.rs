//! Splitting raw socket chunks into candidate sentences.
//!
//! The [`Chunk`] produced here is everything that happens *after* bytes come
//! off the socket and *before* checksum validation:
//! - Decoding as ASCII, dropping any non-ASCII byte.
//! - Detecting chunks that are not newline-terminated (a read boundary fell
//!   inside a sentence).
//! - Splitting on `\n` and removing one trailing `\r` per candidate.
//!
//! There is no cross-chunk buffering. A sentence torn across two reads shows
//! up as two fragments, both of which normally fail the checksum and are
//! dropped. The data rates involved make this rare enough to accept.

/// Candidate sentences extracted from one received chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Candidates in arrival order. May contain empty strings and a trailing
    /// fragment when [`Chunk::terminated`] is `false`.
    pub sentences: Vec<String>,
    /// `false` when the decoded chunk did not end with `\n`.
    pub terminated: bool,
}

impl Chunk {
    /// Decode and split one raw chunk.
    pub fn extract(data: &[u8]) -> Self {
        let decoded = Self::raw_text(data);
        let terminated = decoded.ends_with('\n');
        let body = if terminated {
            decoded.trim_end()
        } else {
            decoded.as_str()
        };

        let sentences = body
            .split('\n')
            .map(|s| s.strip_suffix('\r').unwrap_or(s).to_owned())
            .collect();

        Self {
            sentences,
            terminated,
        }
    }

    /// Decoded text of the chunk, for anomaly reporting.
    pub fn raw_text(data: &[u8]) -> String {
        data.iter()
            .filter(|b| b.is_ascii())
            .map(|&b| char::from(b))
            .collect()
    }
}
