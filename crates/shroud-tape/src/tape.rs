//! The chunked tape container and its loading paths.
//!
//! [`ChunkTape`] is immutable once constructed: decode-side code shares
//! one tape across any number of threads with no interior mutability and
//! no locks. The strict loaders ([`ChunkTape::from_segments`],
//! [`ChunkTape::from_be_bytes`], [`ChunkTape::from_reader`],
//! [`ChunkTape::from_base64`]) validate the canonical layout up front;
//! [`ChunkTape::from_parts`] accepts individually shipped segment slots
//! and defers gaps to access time.

use std::io::Read;

use crate::error::TapeError;
use crate::transport::decode_base64;
use crate::MAX_CHUNK_LEN;

/// A read-only character tape, chunked into bounded segments.
///
/// Logically one contiguous sequence of `total_len` UTF-16 code units;
/// physically a list of segment slots of at most [`MAX_CHUNK_LEN`] units
/// each. Addressing computes `(segment, local)` from the global offset on
/// every access and never joins the segments into one allocation.
///
/// # Examples
///
/// ```
/// use shroud_tape::ChunkTape;
///
/// // Three units [7, 8, 9], serialized big-endian.
/// let tape = ChunkTape::from_be_bytes(&[0, 7, 0, 8, 0, 9], 3).unwrap();
/// assert_eq!(tape.unit_at(1).unwrap(), 8);
/// assert!(tape.unit_at(3).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkTape {
    /// Segment slots in tape order. `None` marks a slot whose resource
    /// was never supplied.
    segments: Vec<Option<Box<[u16]>>>,
    /// Declared logical length in units. Not derivable from the segment
    /// list: the final segment's exact extent would be lost.
    total_len: u64,
}

impl ChunkTape {
    /// Build a tape directly from its logical unit sequence.
    ///
    /// Chunking is applied canonically; the result always passes the
    /// strict layout checks. This is the in-process path from an encoder
    /// to a decodable tape without a serialize/reload cycle.
    pub fn from_units(units: Vec<u16>) -> Self {
        let total_len = units.len() as u64;
        let segments = units
            .chunks(MAX_CHUNK_LEN)
            .map(|chunk| Some(Box::from(chunk)))
            .collect();
        Self {
            segments,
            total_len,
        }
    }

    /// Build a tape from canonically sized segments.
    ///
    /// Every segment but the last must hold exactly [`MAX_CHUNK_LEN`]
    /// units, the last exactly the remainder, and the count must match
    /// the declared length.
    ///
    /// # Errors
    ///
    /// [`TapeError::MalformedBuffer`] on any layout mismatch.
    pub fn from_segments(segments: Vec<Vec<u16>>, total_len: u64) -> Result<Self, TapeError> {
        let expected = expected_segment_count(total_len)?;
        if segments.len() != expected {
            return Err(TapeError::MalformedBuffer {
                detail: format!(
                    "{} segments supplied, {expected} expected for declared length {total_len}",
                    segments.len()
                ),
            });
        }

        let mut checked = Vec::with_capacity(segments.len());
        let mut remaining = total_len;
        for (index, segment) in segments.into_iter().enumerate() {
            let expected_len = remaining.min(MAX_CHUNK_LEN as u64) as usize;
            if segment.len() != expected_len {
                return Err(TapeError::MalformedBuffer {
                    detail: format!(
                        "segment {index} holds {} units, expected {expected_len}",
                        segment.len()
                    ),
                });
            }
            remaining -= expected_len as u64;
            checked.push(Some(segment.into_boxed_slice()));
        }

        Ok(Self {
            segments: checked,
            total_len,
        })
    }

    /// Build a tape from individually shipped segment slots.
    ///
    /// Unlike [`from_segments`](Self::from_segments) this does not demand
    /// the canonical layout: slots may be absent and present segments may
    /// be short. Such gaps surface at access time as
    /// [`TapeError::SegmentMissing`] / [`TapeError::LocalOffsetOutOfRange`]
    /// rather than failing construction, mirroring how a packaging step
    /// that drops one resource still yields a partially readable tape.
    ///
    /// # Errors
    ///
    /// [`TapeError::MalformedBuffer`] if a present segment exceeds
    /// [`MAX_CHUNK_LEN`] units; such a segment can never be addressed
    /// and is always a packaging defect.
    pub fn from_parts(parts: Vec<Option<Vec<u16>>>, total_len: u64) -> Result<Self, TapeError> {
        for (index, part) in parts.iter().enumerate() {
            if let Some(segment) = part {
                if segment.len() > MAX_CHUNK_LEN {
                    return Err(TapeError::MalformedBuffer {
                        detail: format!(
                            "segment {index} holds {} units, over the {MAX_CHUNK_LEN}-unit bound",
                            segment.len()
                        ),
                    });
                }
            }
        }

        Ok(Self {
            segments: parts
                .into_iter()
                .map(|part| part.map(Vec::into_boxed_slice))
                .collect(),
            total_len,
        })
    }

    /// Reconstruct a tape from its flat serialized form.
    ///
    /// The buffer holds consecutive big-endian `u16` code units with no
    /// header; segment boundaries are recomputed from [`MAX_CHUNK_LEN`]
    /// and the declared length alone. Bytes beyond `total_len` units are
    /// ignored.
    ///
    /// # Errors
    ///
    /// [`TapeError::MalformedBuffer`] if the buffer length is odd, or the
    /// declared length requires more units than the buffer holds, or the
    /// segment count overflows addressable memory.
    pub fn from_be_bytes(bytes: &[u8], total_len: u64) -> Result<Self, TapeError> {
        if bytes.len() % 2 != 0 {
            return Err(TapeError::MalformedBuffer {
                detail: format!(
                    "buffer of {} bytes is not a whole number of 2-byte units",
                    bytes.len()
                ),
            });
        }
        let available = (bytes.len() / 2) as u64;
        if total_len > available {
            return Err(TapeError::MalformedBuffer {
                detail: format!(
                    "declared length {total_len} exceeds the {available} units available"
                ),
            });
        }

        let expected = expected_segment_count(total_len)?;
        let mut segments = Vec::with_capacity(expected);
        let mut cursor = 0;
        let mut remaining = total_len;
        while remaining > 0 {
            let seg_units = remaining.min(MAX_CHUNK_LEN as u64) as usize;
            let end = cursor + seg_units * 2;
            let segment: Box<[u16]> = bytes[cursor..end]
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            segments.push(Some(segment));
            cursor = end;
            remaining -= seg_units as u64;
        }

        Ok(Self {
            segments,
            total_len,
        })
    }

    /// Stream a tape from a reader, one segment at a time.
    ///
    /// Reads exactly `total_len` big-endian units and leaves anything
    /// after them unconsumed. Peak extra memory is one segment's bytes,
    /// so arbitrarily large tapes load without a full-buffer copy.
    ///
    /// # Errors
    ///
    /// [`TapeError::MalformedBuffer`] if the stream ends early,
    /// [`TapeError::Io`] for any other read failure.
    pub fn from_reader<R: Read>(mut reader: R, total_len: u64) -> Result<Self, TapeError> {
        // Validate the declared length but never size an allocation from
        // it; the slot table grows only as segments actually arrive.
        expected_segment_count(total_len)?;
        let mut segments = Vec::new();
        let mut buf = vec![0u8; MAX_CHUNK_LEN * 2];
        let mut loaded = 0u64;
        while loaded < total_len {
            let seg_units = (total_len - loaded).min(MAX_CHUNK_LEN as u64) as usize;
            let chunk = &mut buf[..seg_units * 2];
            reader.read_exact(chunk).map_err(|e| {
                if e.kind() == std::io::ErrorKind::UnexpectedEof {
                    TapeError::MalformedBuffer {
                        detail: format!(
                            "unexpected end of stream: {loaded} of {total_len} units loaded"
                        ),
                    }
                } else {
                    TapeError::Io(e)
                }
            })?;
            let segment: Box<[u16]> = chunk
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            segments.push(Some(segment));
            loaded += seg_units as u64;
        }

        Ok(Self {
            segments,
            total_len,
        })
    }

    /// Reconstruct a tape from its Base64 transport form.
    ///
    /// Equivalent to [`decode_base64`] followed by
    /// [`from_be_bytes`](Self::from_be_bytes).
    pub fn from_base64(text: &str, total_len: u64) -> Result<Self, TapeError> {
        let bytes = decode_base64(text)?;
        Self::from_be_bytes(&bytes, total_len)
    }

    /// Read the code unit at a global tape offset.
    ///
    /// Resolves `segment = offset / MAX_CHUNK_LEN` and
    /// `local = offset % MAX_CHUNK_LEN` on each call.
    ///
    /// # Errors
    ///
    /// [`TapeError::OffsetOutOfRange`] past the declared length or the
    /// available slots, [`TapeError::SegmentMissing`] for an absent slot,
    /// [`TapeError::LocalOffsetOutOfRange`] inside a short segment.
    pub fn unit_at(&self, offset: u64) -> Result<u16, TapeError> {
        if offset >= self.total_len {
            return Err(TapeError::OffsetOutOfRange {
                offset,
                len: self.total_len,
            });
        }
        let segment = offset / MAX_CHUNK_LEN as u64;
        let local = (offset % MAX_CHUNK_LEN as u64) as usize;

        let index = match usize::try_from(segment) {
            Ok(index) if index < self.segments.len() => index,
            _ => {
                return Err(TapeError::OffsetOutOfRange {
                    offset,
                    len: self.total_len,
                })
            }
        };

        match &self.segments[index] {
            None => Err(TapeError::SegmentMissing { segment: index }),
            Some(data) if local >= data.len() => Err(TapeError::LocalOffsetOutOfRange {
                segment: index,
                local,
                segment_len: data.len(),
            }),
            Some(data) => Ok(data[local]),
        }
    }

    /// Declared logical length in code units.
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Whether the tape holds no units at all.
    pub fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    /// Number of segment slots, absent ones included.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Borrow a segment's units, or `None` for an absent or out-of-range
    /// slot.
    pub fn segment(&self, index: usize) -> Option<&[u16]> {
        self.segments.get(index).and_then(|slot| slot.as_deref())
    }
}

/// Number of segments a tape of `total_len` units occupies.
fn expected_segment_count(total_len: u64) -> Result<usize, TapeError> {
    let count = total_len.div_ceil(MAX_CHUNK_LEN as u64);
    usize::try_from(count).map_err(|_| TapeError::MalformedBuffer {
        detail: format!("declared length {total_len} overflows the segment count"),
    })
}
