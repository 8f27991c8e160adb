//! Formatting utilities

use humansize::{DECIMAL, format_size};
use studio_mdl::Bounds;

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Share of `part` in `total`, or "N/A" when `total` is zero
pub fn format_ratio(part: usize, total: usize) -> String {
    if total == 0 {
        "N/A".to_string()
    } else {
        format_percentage(part as f64 / total as f64 * 100.0)
    }
}

/// Format a bounding box as `(x, y, z) .. (x, y, z)`
pub fn format_bounds(bounds: &Bounds) -> String {
    let (min, max) = (bounds.min, bounds.max);
    format!(
        "({:.2}, {:.2}, {:.2}) .. ({:.2}, {:.2}, {:.2})",
        min.x, min.y, min.z, max.x, max.y, max.z
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1024), "1.02 kB");
        assert_eq!(format_bytes(1048576), "1.05 MB");
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(1, 4), "25.0%");
        assert_eq!(format_ratio(4, 4), "100.0%");
        assert_eq!(format_ratio(0, 0), "N/A");
    }

    #[test]
    fn test_format_bounds() {
        let bounds = Bounds::new(Vec3::new(-1.0, 0.0, 0.5), Vec3::new(2.0, 3.25, 10.0));
        assert_eq!(
            format_bounds(&bounds),
            "(-1.00, 0.00, 0.50) .. (2.00, 3.25, 10.00)"
        );
    }
}
