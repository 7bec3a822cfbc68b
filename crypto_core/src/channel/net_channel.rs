use crate::AbstractChannel;
use std::io::Result;
use std::{
    io::{BufReader, BufWriter, Read, Write},
    net::{TcpListener, TcpStream, ToSocketAddrs},
};
use structopt::StructOpt;
use tracing::{debug, info};

const LOG_TARGET: &str = "crypto_core::channel";

pub struct NetChannel<R: Read, W: Write> {
    is_server: bool,
    reader: BufReader<R>,
    writer: BufWriter<W>,
    read_bytes_size: usize,
    write_bytes_size: usize,
    flush_num: usize,
}

impl NetChannel<TcpStream, TcpStream> {
    /// Listen on `addr` and accept one peer when `is_server`, otherwise
    /// connect to it.
    pub fn new<A: ToSocketAddrs>(is_server: bool, addr: A) -> Result<Self> {
        let socket = if is_server {
            let listener = TcpListener::bind(addr)?;
            let (socket, peer) = listener.accept()?;
            info!(target: LOG_TARGET, %peer, "accepted connection");
            socket
        } else {
            let socket = TcpStream::connect(addr)?;
            info!(target: LOG_TARGET, peer = %socket.peer_addr()?, "connected");
            socket
        };
        socket.set_nodelay(true)?;

        Ok(Self {
            is_server,
            reader: BufReader::new(socket.try_clone()?),
            writer: BufWriter::new(socket),
            read_bytes_size: 0,
            write_bytes_size: 0,
            flush_num: 0,
        })
    }
}

impl<R: Read, W: Write> NetChannel<R, W> {
    pub fn is_server(&self) -> bool {
        self.is_server
    }

    /// `(bytes read, bytes written, flushes)` so far.
    pub fn stats(&self) -> (usize, usize, usize) {
        (self.read_bytes_size, self.write_bytes_size, self.flush_num)
    }
}

impl<R: Read, W: Write> AbstractChannel for NetChannel<R, W> {
    #[inline(always)]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.write_bytes_size += bytes.len();
        Ok(())
    }

    #[inline(always)]
    fn read_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        self.reader.read_exact(bytes)?;
        self.read_bytes_size += bytes.len();
        Ok(())
    }

    #[inline(always)]
    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.flush_num += 1;
        debug!(target: LOG_TARGET, written = self.write_bytes_size, "flushed");
        Ok(())
    }
}

#[derive(StructOpt, Debug)]
pub struct CommandLineOpt {
    /// 1 for the listening party, 0 for the connecting one.
    #[structopt(short, long, default_value = "-1")]
    pub is_server: i32,

    #[structopt(short, long, default_value = "127.0.0.1:12345")]
    pub addr: String,
}
