use crate::error::Result;
use crate::profile::get_by_key;
use crate::settings::{load_settings, save_settings, settings_path};
use crate::summary::SummaryLayout;

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("Settings:     {}", settings_path().display());
    println!("Output dir:   {}", settings.output_dir);
    println!("File name:    {}", settings.default_name);
    println!("Profile:      {}", settings.profile);
    match settings.layout {
        Some(layout) => println!("Layout:       {layout}"),
        None => println!("Layout:       (profile default)"),
    }
    Ok(())
}

pub fn set(
    output_dir: Option<String>,
    name: Option<String>,
    profile: Option<String>,
    layout: Option<SummaryLayout>,
    clear_layout: bool,
) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = output_dir {
        settings.output_dir = dir;
    }
    if let Some(name) = name {
        settings.default_name = name;
    }
    if let Some(key) = profile {
        settings.profile = get_by_key(&key)?.key.to_string();
    }
    if layout.is_some() {
        settings.layout = layout;
    }
    if clear_layout {
        settings.layout = None;
    }
    save_settings(&settings)?;
    println!("Saved {}", settings_path().display());
    Ok(())
}
