use log::info;
use net_trainer::{Forward, Layer, Linear, Network, Tensor};

/// Builds a 2-2-1 network that computes XOR of its two inputs.
fn xor_network() -> anyhow::Result<Network> {
    let hidden = Linear::from_parts(
        Tensor::from_shape_vec([2, 2], vec![1., 1., 1., 1.])?,
        Tensor::from(vec![0., -1.]),
    )?;
    let output = Linear::from_parts(
        Tensor::from_shape_vec([2, 1], vec![1., -2.])?,
        Tensor::from(vec![0.]),
    )?;

    Ok(Network::new([
        Layer::from(hidden),
        Layer::relu(),
        Layer::from(output),
    ]))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let net = xor_network()?;
    info!("network has {} layers", net.len());

    let x = Tensor::from_shape_vec([4, 2], vec![0., 0., 0., 1., 1., 0., 1., 1.])?;
    let y = net.forward_batch(&x)?;

    for r in 0..x.shape()[0] {
        let input = x.row(r)?;
        info!("{:?} -> {:?}", input.as_slice(), y.row(r)?.as_slice());
        println!("{:?} -> {}", input.as_slice(), net.forward(&input)?[[0]]);
    }

    Ok(())
}
