use std::f32::consts::TAU;

use meshfold::{Mesh, SENTINEL};

/// An axis-aligned cube of edge length `size`, centered on the origin, with one quad per side.
pub fn cube(size: f32) -> Mesh {
    let h = size / 2.0;
    let mut positions = Vec::with_capacity(8 * 3);
    for i in 0..8 {
        positions.extend([
            if i & 1 == 0 { -h } else { h },
            if i & 2 == 0 { -h } else { h },
            if i & 4 == 0 { -h } else { h },
        ]);
    }
    #[rustfmt::skip]
    let indices = vec![
        0, 2, 3, 1, SENTINEL,
        4, 5, 7, 6, SENTINEL,
        0, 1, 5, 4, SENTINEL,
        2, 6, 7, 3, SENTINEL,
        0, 4, 6, 2, SENTINEL,
        1, 3, 7, 5, SENTINEL,
    ];
    Mesh::new(positions, indices).with_name("cube")
}

/// A prism of height `size` over a regular polygon with `sides` corners on the unit circle.
///
/// The side walls are quads; the caps are single n-gons.
pub fn prism(sides: u32, size: f32) -> Mesh {
    let n = sides as i32;
    let h = size / 2.0;
    let mut positions = Vec::with_capacity(sides as usize * 2 * 3);
    for z in [-h, h] {
        for i in 0..sides {
            let theta = TAU * i as f32 / sides as f32;
            positions.extend([theta.cos(), theta.sin(), z]);
        }
    }

    let mut indices = Vec::new();
    for i in 0..n {
        let j = (i + 1) % n;
        indices.extend([i, j, n + j, n + i, SENTINEL]);
    }
    indices.extend(n..2 * n);
    indices.push(SENTINEL);
    indices.extend((0..n).rev());
    indices.push(SENTINEL);

    Mesh::new(positions, indices).with_name(format!("prism{sides}"))
}
