pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Size in mebibytes with two decimals, e.g. `"0.00 MB"` for tiny files.
    pub fn format_megabytes(size: u64) -> String {
        format!("{:.2} MB", size as f64 / 1024.0 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::FileSizeUtils;

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(FileSizeUtils::format_megabytes(5), "0.00 MB");
        assert_eq!(FileSizeUtils::format_megabytes(1024 * 1024), "1.00 MB");
        assert_eq!(FileSizeUtils::format_megabytes(5 * 1024 * 1024 / 2), "2.50 MB");
    }
}
