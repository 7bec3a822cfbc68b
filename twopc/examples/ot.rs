use std::net::TcpStream;

use crypto_core::{AesRng, Block, CommandLineOpt, NetChannel};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;
use twopc::ot::{OtReceiver, OtSender, TedOtReceiver, TedOtSender};

const LANES: usize = 8;

fn ot_test(netio: &mut NetChannel<TcpStream, TcpStream>) -> anyhow::Result<()> {
    let mut rng = AesRng::new();
    if netio.is_server() {
        let m: Vec<(Block, Block)> = (0..LANES)
            .map(|_| (rand::random::<Block>(), rand::random::<Block>()))
            .collect();
        let mut ot = TedOtSender;
        ot.send(netio, &m, &mut rng)?;
        println!("send blocks: {:?}", m);
    } else {
        let select: Vec<bool> = (0..LANES).map(|_| rand::random::<bool>()).collect();
        let mut ot = TedOtReceiver;
        let result = ot.receive(netio, &select, &mut rng)?;
        println!("select bits: {:?}", select);
        println!("received blocks: {:?}", result);
    }
    Ok(())
}

// run the main function in two terminals
// cargo run --example ot -- --is-server 1
// cargo run --example ot -- --is-server 0
pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opt = CommandLineOpt::from_args();
    let mut netio = NetChannel::new(opt.is_server != 0, opt.addr.as_str())?;
    ot_test(&mut netio)
}
