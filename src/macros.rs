#[macro_export]
macro_rules! toml {
    // Handle booleans
    (true) => {
        $crate::Value::Boolean(true)
    };

    (false) => {
        $crate::Value::Boolean(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::Array($crate::Array::new())
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {{
        let mut array = $crate::Array::new();
        $(
            array
                .push($crate::toml!($elem))
                .expect("mixed value kinds in toml! array");
        )*
        $crate::Value::Array(array)
    }};

    // Handle empty table
    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    // Handle non-empty table
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($key.to_string(), $crate::toml!($value));
        )*
        $crate::Value::Table(table)
    }};

    // Fallback for any expression
    ($other:expr) => {
        $crate::to_value(&$other).expect("value cannot be represented in TOML")
    };
}
