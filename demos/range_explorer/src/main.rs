use argh::FromArgs;
use mrtk::tensor::{parse_range_spec, Tensor};

/// Applies a textual range specification to a ramp tensor and prints the selection
#[derive(Debug, FromArgs)]
struct Args {
    /// comma-separated tensor extents, e.g. 3,4
    #[argh(option, short = 's', default = "Extents(vec![3, 4])", from_str_fn(parse_shape))]
    shape: Extents,

    /// range specification, e.g. "0:2, :"
    #[argh(option, short = 'r', default = "String::from(\":\")")]
    range: String,

    /// write this value through the view before printing the tensor
    #[argh(option, short = 'f')]
    fill: Option<f32>,
}

/// Tensor extents given on the command line as a single comma-separated list.
#[derive(Debug)]
struct Extents(Vec<usize>);

fn parse_shape(value: &str) -> Result<Extents, String> {
    value
        .split(',')
        .map(|s| s.trim().parse::<usize>().map_err(|e| format!("{s}: {e}")))
        .collect::<Result<Vec<_>, _>>()
        .map(Extents)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let Extents(dims) = args.shape;
    let numel: usize = dims.iter().product();
    let mut tensor =
        Tensor::<f32>::from_shape_vec(&dims, (0..numel).map(|v| v as f32).collect())?
            .with_name("ramp");
    log::info!("tensor {:?} with strides {:?}", tensor.dims(), tensor.strides());

    let ranges = parse_range_spec(&args.range)?;
    for (axis, r) in ranges.iter().enumerate() {
        log::debug!("axis {axis}: {r}");
    }

    let view = tensor.view(&ranges)?;
    println!("view {view}");
    println!("  dims:      {:?}", view.dims());
    println!("  free axes: {:?}", view.free_axes());
    println!("  addresses: {:?}", view.addresses());
    println!("{}", view.to_tensor()?);

    if let Some(value) = args.fill {
        let mut target = tensor.view_mut(&ranges)?;
        target.fill(value);
        log::info!("filled {} elements with {value}", target.numel());
        println!("{tensor}");
    }

    Ok(())
}
