#[macro_export]
macro_rules! opt {
    (, $default:ident) => {
        $default
    };
    ($optional:expr, $default:ident) => {
        $optional
    };
}

#[macro_export]
macro_rules! params_internal {
    ($vec:ident, required, $key:expr, $val:expr) => {
        $vec.push(($key, $val.to_string()));
    };
    ($vec:ident, optional, $key:expr, $val:expr) => {
        if let Some(ref v) = $val {
            $vec.push(($key, v.to_string()));
        }
    };
}

/// Build query parameters for an API endpoint as `Vec<(String, String)>`.
/// A `required` parameter is always emitted, an `optional` one only when it is `Some`.
/// ```ignore
/// let params = build_params! {
///     required count => 200,
///     optional max_id => max_id,
/// };
/// ```
#[macro_export]
macro_rules! build_params {
    (
        $(
            $kind:ident $name:ident $( => $val:expr )?
        ),+ $(,)?
    ) => {
        {
            let mut params: Vec<(String, String)> = Vec::new();
            $(
                $crate::params_internal!(
                    params,
                    $kind,
                    stringify!($name).to_string(),
                    $crate::opt!($( $val )?, $name)
                );
            )+
            params
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_build_params() {
        let cursor = -1i64;
        let max_id: Option<u64> = None;
        let params = build_params! {
            required count => 200,
            required cursor,
            optional max_id,
            optional since_id => Some(7u64),
        };
        assert_eq!(
            params,
            vec![
                ("count".to_string(), "200".to_string()),
                ("cursor".to_string(), "-1".to_string()),
                ("since_id".to_string(), "7".to_string()),
            ]
        );
    }
}
