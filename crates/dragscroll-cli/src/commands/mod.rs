pub mod config;
pub mod curve;
pub mod simulate;

/// Parse `WIDTHxHEIGHT` (e.g. `800x600`)
pub fn parse_size(value: &str) -> Result<(f64, f64), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {value}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .ok_or_else(|| format!("invalid dimension {part:?} in {value}"))
    };
    Ok((parse(width)?, parse(height)?))
}
