use excuse_common::{Category, ExcuseResponse, Seriousness, Tone};

pub fn print_excuse(resp: &ExcuseResponse) {
    if !resp.success {
        eprintln!(
            "✗ Generation failed: {}",
            resp.error.as_deref().unwrap_or("unknown error")
        );
        return;
    }
    println!("\nSubject: {}\n", resp.subject);
    println!("{}", resp.body);
    println!();
}

pub fn print_options() {
    println!("\n[Categories]");
    println!("  {:<18} {:<18}", "Label", "Flag value");
    for c in Category::ALL {
        println!("  {:<18} {:<18}", c.label(), c.slug());
    }

    println!("\n[Tones]");
    for t in Tone::ALL {
        println!("  {}", t.label());
    }

    println!("\n[Seriousness]");
    for s in Seriousness::all() {
        println!("  {}  {}", s, s.description());
    }
    println!();
}
