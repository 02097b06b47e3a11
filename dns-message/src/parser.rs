use crate::{MessageError, Result};
use nom::bytes::complete::take;
use nom::number::complete::{be_u16, be_u8};
use nom::IResult;
use tracing::trace;

/// Runs `parser` over `buf` starting at `offset`, returning the parsed value
/// and the offset of the first byte it did not consume.
///
/// Any parse failure means the buffer ran out, so it is reported as a
/// truncated message at the offset the read started from.
pub(crate) fn read_at<'a, O, F>(buf: &'a [u8], offset: usize, mut parser: F) -> Result<(O, usize)>
where
    F: FnMut(&'a [u8]) -> IResult<&'a [u8], O>,
{
    let truncated = || MessageError::TruncatedMessage {
        offset,
        len: buf.len(),
    };
    let input = buf.get(offset..).ok_or_else(truncated)?;
    let (rest, value) = parser(input).map_err(|_| truncated())?;
    Ok((value, buf.len() - rest.len()))
}

pub(crate) fn read_u8(buf: &[u8], offset: usize) -> Result<(u8, usize)> {
    read_at(buf, offset, be_u8)
}

pub(crate) fn read_u16(buf: &[u8], offset: usize) -> Result<(u16, usize)> {
    trace!("reading u16 at {}", offset);
    read_at(buf, offset, be_u16)
}

pub(crate) fn read_bytes(buf: &[u8], offset: usize, len: usize) -> Result<(&[u8], usize)> {
    trace!("reading {} bytes at {}", len, offset);
    read_at(buf, offset, take(len))
}
