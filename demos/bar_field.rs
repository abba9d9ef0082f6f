use std::error::Error;
use std::io;

use pole_field::prelude::*;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();

    // Reference 10 x 4 bar, both closed-form models on a coarse grid.
    let grid = GridSpec::square(15.0, 31);
    for model in [BarModel::Corners, BarModel::LineCharges] {
        let config = SimulationConfig::reference_bar().with_bar_model(model).with_grid(grid);
        let sim = FieldSimulation::new(config)?;
        let map = sim.run();

        let centre = sim.evaluator().field_at(R2::new(0.0, 0.0))?;
        eprintln!(
            "{model:?}: B(0,0) = ({:.6e}, {:.6e}), V(0,0) = {:.6e}, {} singular cells",
            centre.bx,
            centre.bz,
            centre.v,
            map.singular_count()
        );
        if model == BarModel::Corners {
            write_field_csv(io::stdout().lock(), &map)?;
        }
    }
    Ok(())
}
