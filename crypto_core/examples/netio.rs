use std::net::TcpStream;
use structopt::StructOpt;

use crypto_core::{ted::random_scalar, AbstractChannel, AesRng, CommandLineOpt, NetChannel, TedPoint};
use num_bigint::BigUint;
use rand::random;

fn send(netio: &mut NetChannel<TcpStream, TcpStream>, rng: &mut AesRng) -> std::io::Result<()> {
    let bools = random::<[bool; 10]>();
    let block = rng.gen_block();
    let point = TedPoint::base().scalar_mul(&random_scalar(rng));
    let big = BigUint::from(random::<u64>()) << 200;

    println!("send_bools: {:?}", bools);
    println!("send_block: {:?}", block);
    println!("send_point: {:?}", point.encode());
    println!("send_biguint: {}", big);

    netio.write_bools(&bools)?;
    netio.write_block(&block)?;
    netio.write_point(&point)?;
    netio.write_biguint(&big)?;
    netio.flush()
}

fn recv(netio: &mut NetChannel<TcpStream, TcpStream>) -> std::io::Result<()> {
    let bools = netio.read_bools(10)?;
    let block = netio.read_block()?;
    let point = netio.read_point()?;
    let big = netio.read_biguint()?;

    println!("recv_bools: {:?}", bools);
    println!("recv_block: {:?}", block);
    println!("recv_point: {:?} (on curve: {})", point, TedPoint::decode(&point).is_ok());
    println!("recv_biguint: {}", big);
    Ok(())
}

// run the main function in two terminals
// cargo run --example netio -- --is-server 1
// cargo run --example netio -- --is-server 0
pub fn main() -> std::io::Result<()> {
    let opt = CommandLineOpt::from_args();
    let is_server = opt.is_server != 0;
    let mut netio = NetChannel::new(is_server, opt.addr.as_str())?;
    let mut rng = AesRng::new();

    if netio.is_server() {
        send(&mut netio, &mut rng)?;
        recv(&mut netio)?;
    } else {
        recv(&mut netio)?;
        send(&mut netio, &mut rng)?;
    }
    println!("(read, written, flushes): {:?}", netio.stats());
    Ok(())
}
