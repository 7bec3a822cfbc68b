use std::io::{Error, ErrorKind, Read, Result, Write};

use num_bigint::BigUint;

use crate::{
    ted::{EncodedPoint, TedPoint, POINT_BYTES},
    utils::{bits_to_bytes, pack_bits, unpack_bits},
    Block,
};

mod local_channel;
mod net_channel;

pub use local_channel::{local_channel_pair, LocalChannel};
pub use net_channel::{CommandLineOpt, NetChannel};

/// Largest big integer accepted from a peer, in bytes. Enough for a
/// ciphertext under a 4096-bit Paillier modulus.
pub const MAX_BIGUINT_BYTES: usize = 1024;

/// A trait for a two-party byte channel.
pub trait AbstractChannel {
    /// Write bytes slice to the channel.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;
    /// Read bytes slice from the channel.
    fn read_bytes(&mut self, bytes: &mut [u8]) -> Result<()>;
    /// Flush the channel.
    fn flush(&mut self) -> Result<()>;

    #[inline(always)]
    fn write_bool(&mut self, b: bool) -> Result<()> {
        self.write_bytes(&[b as u8])
    }

    #[inline(always)]
    fn read_bool(&mut self) -> Result<bool> {
        let mut data = [0u8; 1];
        self.read_bytes(&mut data)?;
        Ok(data[0] != 0)
    }

    /// Write a bit vector packed eight to a byte.
    fn write_bools(&mut self, bits: &[bool]) -> Result<()> {
        self.write_bytes(&pack_bits(bits))
    }

    fn read_bools(&mut self, size: usize) -> Result<Vec<bool>> {
        let mut bytes = vec![0u8; bits_to_bytes(size)];
        self.read_bytes(&mut bytes)?;
        Ok(unpack_bits(&bytes, size))
    }

    #[inline(always)]
    fn write_u32(&mut self, x: u32) -> Result<()> {
        self.write_bytes(&x.to_le_bytes())
    }

    #[inline(always)]
    fn read_u32(&mut self) -> Result<u32> {
        let mut data = [0u8; 4];
        self.read_bytes(&mut data)?;
        Ok(u32::from_le_bytes(data))
    }

    #[inline(always)]
    fn write_block(&mut self, blk: &Block) -> Result<()> {
        self.write_bytes(blk.as_ref())
    }

    #[inline(always)]
    fn read_block(&mut self) -> Result<Block> {
        let mut blk = Block::default();
        self.read_bytes(blk.as_mut())?;
        Ok(blk)
    }

    /// Write a length-prefixed vector of blocks.
    fn write_blocks(&mut self, blks: &[Block]) -> Result<()> {
        self.write_u32(blks.len() as u32)?;
        for blk in blks {
            self.write_block(blk)?;
        }
        Ok(())
    }

    fn read_blocks(&mut self) -> Result<Vec<Block>> {
        let len = self.read_u32()? as usize;
        (0..len).map(|_| self.read_block()).collect()
    }

    /// Write a point in its 32-byte encoding.
    #[inline(always)]
    fn write_point(&mut self, pt: &TedPoint) -> Result<()> {
        self.write_bytes(&pt.encode())
    }

    /// Read a point encoding. Decoding (and its validation) is left to the
    /// caller so that curve errors surface with their own type.
    #[inline(always)]
    fn read_point(&mut self) -> Result<EncodedPoint> {
        let mut data = [0u8; POINT_BYTES];
        self.read_bytes(&mut data)?;
        Ok(data)
    }

    /// Write a length-prefixed little-endian big integer.
    fn write_biguint(&mut self, x: &BigUint) -> Result<()> {
        let bytes = x.to_bytes_le();
        self.write_u32(bytes.len() as u32)?;
        self.write_bytes(&bytes)
    }

    fn read_biguint(&mut self) -> Result<BigUint> {
        let len = self.read_u32()? as usize;
        if len > MAX_BIGUINT_BYTES {
            return Err(Error::new(
                ErrorKind::InvalidData,
                format!("big integer of {len} bytes exceeds limit"),
            ));
        }
        let mut bytes = vec![0u8; len];
        self.read_bytes(&mut bytes)?;
        Ok(BigUint::from_bytes_le(&bytes))
    }
}

/// A standard channel over a reader and a writer. It is `Send` whenever
/// the halves are, so each party can run on its own thread.
pub struct StdChannel<R, W> {
    reader: R,
    writer: W,

    read_bytes: usize,
    write_bytes: usize,
}

impl<R: Read, W: Write> StdChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            read_bytes: 0,
            write_bytes: 0,
        }
    }

    /// Number of bytes written so far.
    pub fn bytes_written(&self) -> usize {
        self.write_bytes
    }

    /// Number of bytes read so far.
    pub fn bytes_read(&self) -> usize {
        self.read_bytes
    }
}

impl<R: Read, W: Write> AbstractChannel for StdChannel<R, W> {
    #[inline(always)]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.write_bytes += bytes.len();
        Ok(())
    }

    #[inline(always)]
    fn read_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        self.reader.read_exact(bytes)?;
        self.read_bytes += bytes.len();
        Ok(())
    }

    #[inline(always)]
    fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }
}
