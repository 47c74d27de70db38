pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (store, _config) = super::open_store()?;
    let snapshot = store.snapshot(chrono::Local::now());
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
