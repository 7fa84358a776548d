use coluna_core::error::ColunaError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), ColunaError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
