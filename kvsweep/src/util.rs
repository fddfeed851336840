#[macro_export]
macro_rules! args {
    ($($element:expr),*) => {{
        #[allow(unused_mut)]
        let mut vs = Vec::new();
        $(vs.push($element.to_string());)*
        vs
    }};
    ($($element:expr,)*) => {{
        $crate::args![$($element),*]
    }};
}

/// Formats a ratio so that integral values keep a fractional part: `1.0` is
/// written as "1.0" (and not "1"), while `0.5` is written as "0.5".
pub fn format_ratio(ratio: f64) -> String {
    if ratio.is_finite() && ratio.fract() == 0.0 {
        format!("{:.1}", ratio)
    } else {
        ratio.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_test() {
        let empty: Vec<String> = args![];
        assert!(empty.is_empty());
        assert_eq!(args![1, "a", 0.5], vec!["1", "a", "0.5"]);
        assert_eq!(args![2, 3,], vec!["2", "3"]);
    }

    #[test]
    fn format_ratio_test() {
        assert_eq!(format_ratio(0.2), "0.2");
        assert_eq!(format_ratio(0.5), "0.5");
        assert_eq!(format_ratio(0.8), "0.8");
        assert_eq!(format_ratio(0.0), "0.0");
        assert_eq!(format_ratio(1.0), "1.0");
        assert_eq!(format_ratio(0.125), "0.125");
    }
}
