//! Packing of 12 bit codes into bytes.
//!
//! Codes go two by two into groups of 3 bytes, most significant bits first:
//!
//! ```text
//! byte 0: first[11..4]
//! byte 1: first[3..0]  second[11..8]
//! byte 2: second[7..0]
//! ```
//!
//! A stream with an odd number of codes ends with a 2 bytes group, the last 4 bits being zero.

use std::{
    collections::VecDeque,
    io::{ErrorKind, Read, Write},
};

use crate::Codeword;

const CODE_MASK: Codeword = 0x0FFF;

/// Pack two codes into a group of 3 bytes. Only the lower 12 bits of each code are kept.
#[inline(always)]
pub const fn pack(first: Codeword, second: Codeword) -> [u8; 3] {
    let first = first & CODE_MASK;
    let second = second & CODE_MASK;
    [
        (first >> 4) as u8,
        ((first << 4) as u8) | (second >> 8) as u8,
        second as u8,
    ]
}

/// Get back the two codes of a group of 3 bytes.
#[inline(always)]
pub const fn unpack(group: [u8; 3]) -> (Codeword, Codeword) {
    let first = ((group[0] as Codeword) << 4) | (group[1] as Codeword >> 4);
    let second = ((group[1] as Codeword & 0x0F) << 8) | group[2] as Codeword;
    (first, second)
}

pub trait CodeReader: Sized {
    /// Read the next code, `None` once the stream is over.
    fn read(&mut self) -> Result<Option<Codeword>, std::io::Error>;

    fn iter(&mut self) -> CodeReaderIterator<Self> {
        CodeReaderIterator::new(self)
    }
}

/// Reads codes 3 bytes at a time, buffering the second code of each group.
pub struct PackedReader<R>
where
    R: Read,
{
    read: R,
    read_buffer: [u8; 3],
    codes: VecDeque<Codeword>,
}

impl<R> PackedReader<R>
where
    R: Read,
{
    pub fn new(read: R) -> Self {
        let read_buffer = [0; 3];
        let codes = VecDeque::with_capacity(2);
        Self {
            read,
            read_buffer,
            codes,
        }
    }

    /// Fill the read buffer as much as the stream allows, returning how many bytes were read.
    fn fill_group(&mut self) -> Result<usize, std::io::Error> {
        let mut filled = 0;
        while filled < self.read_buffer.len() {
            match self.read.read(&mut self.read_buffer[filled..]) {
                Ok(0) => break,
                Ok(count) => filled += count,
                Err(error) if error.kind() == ErrorKind::Interrupted => {}
                Err(error) => return Err(error),
            }
        }
        Ok(filled)
    }

    fn read_group(&mut self) -> Result<(), std::io::Error> {
        let filled = self.fill_group()?;
        match filled {
            3 => {
                let (first, second) = unpack(self.read_buffer);
                self.codes.push_back(first);
                self.codes.push_back(second);
            }
            2 => {
                self.read_buffer[2] = 0;
                let (first, _) = unpack(self.read_buffer);
                self.codes.push_back(first);
            }
            1 => {
                tracing::warn!(
                    byte = self.read_buffer[0],
                    "Discarding a trailing byte too short to hold a code"
                );
            }
            _ => {}
        }
        Ok(())
    }
}

impl<R> CodeReader for PackedReader<R>
where
    R: Read,
{
    fn read(&mut self) -> Result<Option<Codeword>, std::io::Error> {
        if self.codes.is_empty() {
            self.read_group()?;
        }
        Ok(self.codes.pop_front())
    }
}

pub struct CodeReaderIterator<'a, C>
where
    C: CodeReader,
{
    reader: &'a mut C,
}

impl<'a, C> CodeReaderIterator<'a, C>
where
    C: CodeReader,
{
    fn new(reader: &'a mut C) -> Self {
        Self { reader }
    }
}

impl<'a, C> Iterator for CodeReaderIterator<'a, C>
where
    C: CodeReader,
{
    type Item = Result<Codeword, std::io::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read().transpose()
    }
}

pub trait CodeWriter {
    fn write(&mut self, code: Codeword) -> Result<(), std::io::Error>;

    /// Write out a pending half group, if any.
    fn fill(&mut self) -> Result<(), std::io::Error>;

    fn flush(&mut self) -> Result<(), std::io::Error>;
}

impl<C: CodeWriter> CodeWriter for &mut C {
    fn write(&mut self, code: Codeword) -> Result<(), std::io::Error> {
        (**self).write(code)
    }

    fn fill(&mut self) -> Result<(), std::io::Error> {
        (**self).fill()
    }

    fn flush(&mut self) -> Result<(), std::io::Error> {
        (**self).flush()
    }
}

/// Writes codes 3 bytes at a time, holding the first code of each group until the second comes.
pub struct PackedWriter<W>
where
    W: Write,
{
    write: W,
    group: [u8; 3],
    pending: bool,
}

impl<W> PackedWriter<W>
where
    W: Write,
{
    pub fn new(write: W) -> Self {
        let group = [0; 3];
        let pending = false;
        Self {
            write,
            group,
            pending,
        }
    }
}

impl<W> CodeWriter for PackedWriter<W>
where
    W: Write,
{
    #[inline]
    fn write(&mut self, code: Codeword) -> Result<(), std::io::Error> {
        if self.pending {
            let first = unpack(self.group).0;
            self.group = pack(first, code);
            self.pending = false;
            self.write.write_all(&self.group)
        } else {
            self.group = pack(code, 0);
            self.pending = true;
            Ok(())
        }
    }

    #[inline]
    fn fill(&mut self) -> Result<(), std::io::Error> {
        if self.pending {
            self.write.write_all(&self.group[..2])?;
            self.group = [0; 3];
            self.pending = false;
        }

        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> Result<(), std::io::Error> {
        self.write.flush()
    }
}
