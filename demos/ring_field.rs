use std::error::Error;
use std::io;

use pole_field::prelude::*;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = SimulationConfig::reference_hollow_ring()
        .with_charge_count(DEFAULT_CHARGE_COUNT)
        .with_grid(GridSpec::square(15.0, 60));
    let sim = FieldSimulation::new(config)?;
    let map = sim.run();

    let peak = map.magnitude().iter().copied().filter(|b| b.is_finite()).fold(0.0, Scalar::max);
    eprintln!("peak |B| = {peak:.6e}, {} singular cells", map.singular_count());
    for (n, path) in sim.outline(90).iter().enumerate() {
        eprintln!("rim {n}: {} outline points", path.len());
    }

    // VTK on stdout, ready for ParaView.
    write_vtk_rectilinear(io::stdout().lock(), &sim.config().name, &map)?;
    Ok(())
}
