use anyhow::{Context, Result, bail};
use ro_model::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1).peekable();
    let mut expected_classes = -1;
    if args.peek().map(String::as_str) == Some("--classes") {
        args.next();
        let raw = args.next().context("--classes needs a number")?;
        expected_classes = raw
            .parse()
            .with_context(|| format!("bad class count {raw:?}"))?;
    }

    let files: Vec<String> = args.collect();
    if files.is_empty() {
        bail!("Usage: ro_decode [--classes N] <document.json>...");
    }

    let handler = TransferObjectHandler::new();
    let mut diagram = DiagramAggregator::new("ro_decode");
    diagram.set_number_of_classes(expected_classes);

    for path in &files {
        let text = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
        let decoded = handler
            .parse(&text)
            .with_context(|| format!("decode {path}"))?;

        match &decoded {
            TransferObject::Object(object) => println!(
                "{path}: object {:?} members={} properties={}",
                object.title,
                object.members().len(),
                object.get_properties().len()
            ),
            TransferObject::DomainType(domain_type) => println!(
                "{path}: domain type {} properties={}",
                domain_type.identity().unwrap_or_default(),
                domain_type.property_links().len()
            ),
            TransferObject::Property(property) => {
                println!("{path}: property {}", property.identity().unwrap_or_default())
            }
        }

        diagram.add_data(decoded);
    }

    println!("{}", serde_json::to_string_pretty(&diagram)?);
    println!("can be displayed: {}", diagram.can_be_displayed());
    Ok(())
}
