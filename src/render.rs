// --- File: render.rs ---
// Read-only projection of simulation state for an external renderer.
//
// The simulation never owns drawable handles; a renderer calls [`render_instances`] each tick
// and uploads the result as an instance buffer.

use crate::simulation::Simulation;

// This struct MUST match the layout expected by the instance shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct IndividualGpuData {
    pub world_position: [f32; 2],
    pub radius: f32,
    pub _padding1: f32,
    pub color: [f32; 4],
}

/// One instance per live individual, colored by current health.
pub fn render_instances(simulation: &Simulation) -> Vec<IndividualGpuData> {
    let catalog = simulation.catalog();
    simulation
        .individuals()
        .iter()
        .filter(|i| !simulation.ledger().is_marked_dead(i.id))
        .map(|individual| {
            let profile = catalog.get(individual.species);
            IndividualGpuData {
                world_position: individual.position.to_array(),
                radius: profile.radius,
                _padding1: 0.0,
                color: profile.display_color(individual.is_infected()),
            }
        })
        .collect()
}

/// Closed polyline around the arena, slightly outside the walls.
pub fn arena_outline(half_width: f32) -> [[f32; 2]; 5] {
    let d = half_width + 1e-2;
    [[-d, -d], [-d, d], [d, d], [d, -d], [-d, -d]]
}

// --- End of File: render.rs ---
