//! Built-in L-systems.
//!
//! Classic curves that can be rendered without writing a definition file.

use crate::definition::Definition;

/// Available preset L-systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Koch,
    QuadraticKoch,
    Sierpinski,
    Gosper,
    Dragon,
    Plant,
    Tree,
}

impl Preset {
    /// Get all presets.
    pub fn all() -> &'static [Preset] {
        &[
            Preset::Koch,
            Preset::QuadraticKoch,
            Preset::Sierpinski,
            Preset::Gosper,
            Preset::Dragon,
            Preset::Plant,
            Preset::Tree,
        ]
    }

    /// Get the preset name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Koch => "koch",
            Preset::QuadraticKoch => "quadratic-koch",
            Preset::Sierpinski => "sierpinski",
            Preset::Gosper => "gosper",
            Preset::Dragon => "dragon",
            Preset::Plant => "plant",
            Preset::Tree => "tree",
        }
    }

    /// Brief description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            Preset::Koch => "Quadratic Koch curve with right-angle bumps",
            Preset::QuadraticKoch => "Quadratic Koch island edge (8 segments per step)",
            Preset::Sierpinski => "Sierpinski arrowhead curve",
            Preset::Gosper => "Gosper flowsnake on a hexagonal grid",
            Preset::Dragon => "Heighway dragon curve",
            Preset::Plant => "Branching fractal plant",
            Preset::Tree => "Green branching tree",
        }
    }

    /// Parse preset from string.
    pub fn from_name(name: &str) -> Option<Preset> {
        match name.to_lowercase().as_str() {
            "koch" => Some(Preset::Koch),
            "quadratic-koch" | "koch-island" => Some(Preset::QuadraticKoch),
            "sierpinski" | "arrowhead" => Some(Preset::Sierpinski),
            "gosper" | "flowsnake" => Some(Preset::Gosper),
            "dragon" | "heighway" => Some(Preset::Dragon),
            "plant" | "fern" => Some(Preset::Plant),
            "tree" | "choinka" => Some(Preset::Tree),
            _ => None,
        }
    }

    /// The preset's definition, at its default iteration count.
    pub fn definition(&self) -> Definition {
        let name = self.name();
        match self {
            Preset::Koch => Definition::from_parts(name, "F", &[('F', "F+F-F-F+F")], 90.0, 4, true, &[]),
            Preset::QuadraticKoch => {
                Definition::from_parts(name, "F", &[('F', "F+F-F-FF+F+F-F")], 90.0, 3, true, &[])
            }
            Preset::Sierpinski => Definition::from_parts(
                name,
                "A",
                &[('A', "B-A-B"), ('B', "A+B+A")],
                60.0,
                6,
                true,
                &[],
            ),
            Preset::Gosper => Definition::from_parts(
                name,
                "A",
                &[('A', "A-B--B+A++AA+B-"), ('B', "+A-BB--B-A++A+B")],
                60.0,
                4,
                true,
                &[('A', "#00bfff"), ('B', "orange")],
            ),
            Preset::Dragon => Definition::from_parts(
                name,
                "FX",
                &[('X', "X+YF+"), ('Y', "-FX-Y")],
                90.0,
                12,
                false,
                &[('F', "yellow")],
            ),
            Preset::Plant => Definition::from_parts(
                name,
                "X",
                &[('X', "F+[[X]-X]-F[-FX]+X"), ('F', "FF")],
                25.0,
                5,
                false,
                &[('F', "green")],
            ),
            Preset::Tree => Definition::from_parts(
                name,
                "X",
                &[('X', "F[+X][-X]FX"), ('F', "FF")],
                25.7,
                5,
                false,
                &[('F', "green")],
            ),
        }
    }
}
