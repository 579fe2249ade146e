//! Build script for wow-fisher
//! Embeds the Windows manifest (input injection into the game needs the same
//! integrity level as the game client) and sets the application icon

fn main() {
    // Only run on Windows
    #[cfg(windows)]
    {
        embed_windows_resources();
    }
}

#[cfg(windows)]
fn embed_windows_resources() {
    let mut res = winres::WindowsResource::new();

    if std::path::Path::new("wow-fisher.manifest").exists() {
        res.set_manifest_file("wow-fisher.manifest");
    }

    if std::path::Path::new("icons/icon.ico").exists() {
        res.set_icon("icons/icon.ico");
    }

    if let Err(e) = res.compile() {
        // Don't fail the build, just warn
        eprintln!("Warning: Failed to compile Windows resources: {}", e);
    }
}
