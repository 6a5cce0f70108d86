//! The three component slots of a coupled terrestrial water cycle model.

use std::fmt;

use twc_core::FieldDef;

/// Which slot of the coupled model a component fills.
///
/// Each kind comes with the canonical transfers a physically based
/// component of that kind exchanges with the other two. Test components
/// such as the dummy surface layer are free to declare their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    /// Canopy and surface processes: interception, snow, evaporation.
    SurfaceLayer,
    /// Soil column processes: infiltration, runoff generation.
    SubSurface,
    /// River routing and open water bodies.
    OpenWater,
}

const FLUX: &str = "kg m-2 s-1";

const SURFACE_LAYER_IN: &[FieldDef] = &[FieldDef::new("soil_water_stress", "1")];
const SURFACE_LAYER_OUT: &[FieldDef] = &[
    FieldDef::new("throughfall", FLUX),
    FieldDef::new("snowmelt", FLUX),
    FieldDef::new("transpiration", FLUX),
    FieldDef::new("evaporation_soil_surface", FLUX),
    FieldDef::new("evaporation_ponded_water", FLUX),
    FieldDef::new("evaporation_openwater", FLUX),
];
const SUB_SURFACE_IN: &[FieldDef] = &[
    FieldDef::new("evaporation_soil_surface", FLUX),
    FieldDef::new("evaporation_ponded_water", FLUX),
    FieldDef::new("transpiration", FLUX),
    FieldDef::new("throughfall", FLUX),
    FieldDef::new("snowmelt", FLUX),
];
const SUB_SURFACE_OUT: &[FieldDef] = &[
    FieldDef::new("runoff", FLUX),
    FieldDef::new("soil_water_stress", "1"),
];
const OPEN_WATER_IN: &[FieldDef] = &[
    FieldDef::new("evaporation_openwater", FLUX),
    FieldDef::new("runoff", FLUX),
];
const OPEN_WATER_OUT: &[FieldDef] = &[FieldDef::new("discharge", FLUX)];

impl ComponentKind {
    /// All kinds, in canonical slot order. Components run in config
    /// order, not this one.
    pub const ALL: [ComponentKind; 3] = [Self::SurfaceLayer, Self::SubSurface, Self::OpenWater];

    /// Lower-case category name, e.g. `"surfacelayer"`.
    pub fn category(&self) -> &'static str {
        match self {
            Self::SurfaceLayer => "surfacelayer",
            Self::SubSurface => "subsurface",
            Self::OpenWater => "openwater",
        }
    }

    /// Canonical inbound transfers for this kind.
    pub fn canonical_inwards(&self) -> &'static [FieldDef] {
        match self {
            Self::SurfaceLayer => SURFACE_LAYER_IN,
            Self::SubSurface => SUB_SURFACE_IN,
            Self::OpenWater => OPEN_WATER_IN,
        }
    }

    /// Canonical outbound transfers for this kind.
    pub fn canonical_outwards(&self) -> &'static [FieldDef] {
        match self {
            Self::SurfaceLayer => SURFACE_LAYER_OUT,
            Self::SubSurface => SUB_SURFACE_OUT,
            Self::OpenWater => OPEN_WATER_OUT,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}
