use std::{fs, net::TcpStream, path::PathBuf};

use anyhow::Context;
use crypto_core::{paillier, AbstractChannel, AesRng, NetChannel, PaillierPublicKey};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;
use twopc::{run_alice, run_bob, Alice, Bob, ProtocolParams};

#[derive(StructOpt, Debug)]
struct Opt {
    /// 1 runs Alice (listens and garbles), 0 runs Bob (connects and evaluates).
    #[structopt(short, long)]
    is_server: i32,

    #[structopt(short, long, default_value = "127.0.0.1:12345")]
    addr: String,

    /// Private input of this party.
    #[structopt(long)]
    input: u64,

    /// JSON file with `l`, `k` and `inequality`; missing fields take defaults.
    #[structopt(long, parse(from_os_str))]
    params: Option<PathBuf>,

    /// Paillier modulus size on Alice's side.
    #[structopt(long, default_value = "1024")]
    key_bits: usize,
}

fn load_params(path: &Option<PathBuf>) -> anyhow::Result<ProtocolParams> {
    match path {
        Some(p) => {
            let json = fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            Ok(serde_json::from_str(&json)?)
        }
        None => Ok(ProtocolParams::default()),
    }
}

fn alice(
    netio: &mut NetChannel<TcpStream, TcpStream>,
    params: ProtocolParams,
    opt: &Opt,
) -> anyhow::Result<()> {
    let mut rng = AesRng::new();
    let (pk, sk) = paillier::keygen(opt.key_bits, &mut rng)?;
    info!(bits = pk.bits(), "generated Paillier key");

    // Bob only needs the modulus.
    netio.write_biguint(pk.n())?;
    netio.flush()?;

    let mut alice = Alice::new(params, sk, opt.input)?;
    run_alice(&mut alice, netio, &mut rng)?;
    println!("done, Bob holds the result");
    Ok(())
}

fn bob(
    netio: &mut NetChannel<TcpStream, TcpStream>,
    params: ProtocolParams,
    opt: &Opt,
) -> anyhow::Result<()> {
    let mut rng = AesRng::new();
    let pk = PaillierPublicKey::from_modulus(netio.read_biguint()?)?;

    let mut bob = Bob::new(params, pk, opt.input)?;
    let result = run_bob(&mut bob, netio, &mut rng)?;
    println!("a {} b: {}", params.inequality, result);
    Ok(())
}

// run the main function in two terminals
// cargo run --example compare -- --is-server 1 --input 7
// cargo run --example compare -- --is-server 0 --input 3
pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opt = Opt::from_args();
    let params = load_params(&opt.params)?;
    let mut netio = NetChannel::new(opt.is_server != 0, opt.addr.as_str())?;

    if netio.is_server() {
        alice(&mut netio, params, &opt)?;
    } else {
        bob(&mut netio, params, &opt)?;
    }
    info!(stats = ?netio.stats(), "finished");
    Ok(())
}
