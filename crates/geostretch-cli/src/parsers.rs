//! Parsers for composite CLI values.

/// Parse three one-based band indices in format "i,j,k"
///
/// # Arguments
/// * `bands_str` - A string such as "1,2,3" or "4, 3, 2"
///
/// # Returns
/// The indices in channel order
pub fn parse_band_indices(bands_str: &str) -> Result<[usize; 3], String> {
    let parts: Vec<&str> = bands_str.split(',').collect();
    if parts.len() != 3 {
        return Err(format!(
            "Bands must be three comma-separated indices (e.g., 1,2,3), got: {}",
            bands_str
        ));
    }

    let mut indices = [0usize; 3];
    for (slot, part) in indices.iter_mut().zip(&parts) {
        let index = part
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("Invalid band index: {}", part.trim()))?;
        if index == 0 {
            return Err("Band indices are one-based; 0 is not a band".to_string());
        }
        *slot = index;
    }

    Ok(indices)
}

/// Parse a percentile in [0, 100]
pub fn parse_percent(value: &str) -> Result<f64, String> {
    let percent = value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid percentile: {}", value))?;
    if !(0.0..=100.0).contains(&percent) {
        return Err(format!("Percentile {} must be in range [0, 100]", percent));
    }
    Ok(percent)
}

/// Parse a strictly positive gamma
pub fn parse_gamma(value: &str) -> Result<f64, String> {
    let gamma = value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid gamma: {}", value))?;
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(format!("Gamma {} must be a positive number", gamma));
    }
    Ok(gamma)
}
