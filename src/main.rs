fn main() -> anyhow::Result<()> {
    println!("Physics Sprites");
    println!("Controls:");
    println!("  Drag with the left mouse button to throw the photos around");
    println!("  Space - Pause / resume");
    println!("  Escape - Exit");
    println!();

    physicssprites::run()
}
