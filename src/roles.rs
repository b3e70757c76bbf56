// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Jungle Protocol Simulation Suite - Role Assignment

use crate::rng::DrawSource;
use crate::types::{NodeId, Role};

/// Shuffle all node ids with `rng`, then hand out roles in shuffle order:
/// the first `stabilizers` ids become stabilizers, the next `sources`
/// become sources, and every remaining id is an amplifier.
///
/// Consumes exactly the draws of one shuffle of `node_count` ids.
pub fn assign_roles<R: DrawSource>(
    node_count: usize,
    stabilizers: usize,
    sources: usize,
    rng: &mut R,
) -> Vec<Role> {
    let mut order: Vec<NodeId> = (0..node_count as NodeId).collect();
    rng.shuffle(&mut order);

    let mut roles = vec![Role::Amplifier; node_count];
    for (rank, &node) in order.iter().enumerate() {
        roles[node as usize] = if rank < stabilizers {
            Role::Stabilizer
        } else if rank < stabilizers + sources {
            Role::Source
        } else {
            Role::Amplifier
        };
    }
    roles
}

/// Ids holding `role`, ascending.
pub fn members(roles: &[Role], role: Role) -> Vec<NodeId> {
    roles
        .iter()
        .enumerate()
        .filter(|(_, r)| **r == role)
        .map(|(i, _)| i as NodeId)
        .collect()
}
