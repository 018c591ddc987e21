//! Plate Solver Example - uniformly loaded square plate

use anyhow::Result;
use log::info;

use plate_solver::prelude::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Unit square, D = E t³ / 12(1 - ν²) = 1
    let material = PlateMaterial::isotropic(10920.0, 0.3, 0.1);

    for boundary in [BoundaryCondition::SimplySupported, BoundaryCondition::Clamped] {
        let model = PlateModel::new(1.0, 1.0, 4, 4, material)
            .with_boundary(boundary)
            .with_pressure(-1.0);

        let results = model.analyze(&AnalysisOptions::default())?;
        let centre = results
            .displacement_at(0.5, 0.5)
            .copied()
            .unwrap_or_default();

        info!("=== {} plate, 4x4 mesh ===", boundary);
        info!("  centre deflection w = {:.10}", centre.dz);
        info!(
            "  applied load = {:.6}, total reaction = {:.6}",
            results.summary.total_load, results.summary.total_reaction
        );
        if let Some(r) = results.resultants.get(5) {
            info!("  element 5 moments: Mx = {:.6}, My = {:.6}, Mxy = {:.6}", r.mx, r.my, r.mxy);
        }
    }

    Ok(())
}
