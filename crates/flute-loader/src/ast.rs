//! The plain structured description produced by parsing, before it is
//! folded into an [`flute_acoustics::Instrument`].

#[derive(Debug, Clone)]
pub struct ParsedNote {
    pub name: String,
    pub octave: i32,
    pub hole_config: String,
}

#[derive(Debug, Clone, Copy)]
pub enum ParsedHoleKind {
    Plain,
    Silver { pad_height: f64, pad_diam: f64 },
}

#[derive(Debug, Clone)]
pub struct ParsedHole {
    pub pos: f64,
    pub diam: f64,
    pub depth: f64,
    pub edge_rc: f64,
    pub kind: ParsedHoleKind,
}

#[derive(Debug, Clone, Copy)]
pub struct ParsedEmbouchure {
    pub pos: f64,
    pub char_dim: f64,
    pub cav_length: f64,
    pub diam: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct ParsedTermination {
    pub flange_diam: f64,
}

/// A fully parsed instrument description, in absolute metres, with
/// length-reference labels already resolved to positions. Nothing here
/// has been validated against acoustic invariants yet.
#[derive(Debug, Clone, Default)]
pub struct ParsedFlute {
    pub notes: Vec<ParsedNote>,
    pub temp_c: f64,
    pub bore_points: Vec<(f64, f64)>,
    pub embouchure: Option<ParsedEmbouchure>,
    pub termination: Option<ParsedTermination>,
    pub holes: Vec<ParsedHole>,
}
