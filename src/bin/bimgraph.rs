use std::{env, path::PathBuf, process};

use bimgraph::{BuildingGraph, BuildingGraphError, loader, query::QueryEngine};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct CommandLineConfig {
    database: String,
    data: Option<String>,
    command: String,
    id: Option<String>,
    from: Option<String>,
    to: Option<String>,
    depth: Option<u32>,
}

impl CommandLineConfig {
    fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut config = CommandLineConfig {
            database: String::from("memory"),
            command: String::from("status"),
            ..CommandLineConfig::default()
        };
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match *arg {
                "--db" | "--database" => {
                    config.database = iter
                        .next()
                        .ok_or_else(|| "--db requires a value".to_string())?
                        .to_string();
                }
                "--data" => {
                    config.data = Some(
                        iter.next()
                            .ok_or_else(|| "--data requires a value".to_string())?
                            .to_string(),
                    );
                }
                "--command" => {
                    config.command = iter
                        .next()
                        .ok_or_else(|| "--command requires a value".to_string())?
                        .to_string();
                }
                "--id" => {
                    config.id = Some(
                        iter.next()
                            .ok_or_else(|| "--id requires a value".to_string())?
                            .to_string(),
                    );
                }
                "--from" => {
                    config.from = Some(
                        iter.next()
                            .ok_or_else(|| "--from requires a value".to_string())?
                            .to_string(),
                    );
                }
                "--to" => {
                    config.to = Some(
                        iter.next()
                            .ok_or_else(|| "--to requires a value".to_string())?
                            .to_string(),
                    );
                }
                "--depth" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| "--depth requires a value".to_string())?;
                    let depth = value
                        .parse::<u32>()
                        .map_err(|_| format!("--depth expects a number, got '{value}'"))?;
                    config.depth = Some(depth);
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                _ => {
                    config.command = (*arg).to_string();
                }
            }
        }
        Ok(config)
    }

    fn help() -> &'static str {
        "Usage: bimgraph [--db memory|PATH] [--data DATASET.json] [--command CMD]\n\
         Commands:\n\
         \x20 status                        element count\n\
         \x20 metadata                      whole-graph statistics\n\
         \x20 stats --id ROOT               per-type counts and room area under ROOT\n\
         \x20 descendants --id ROOT [--depth N]\n\
         \x20 rooms --id ROOM               rooms one door away from ROOM\n\
         \x20 path --from ROOM --to ROOM    shortest door-to-door path\n"
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", CommandLineConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    let graph = match open_graph(&config) {
        Ok(g) => g,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    if let Some(data) = config.data.as_deref() {
        match loader::load_file(&graph, data) {
            Ok(stats) => {
                println!(
                    "loaded elements={} relations={}",
                    stats.elements, stats.relations
                );
            }
            Err(err) => {
                eprintln!("load failed: {err}");
                process::exit(1);
            }
        }
    }

    if let Err(err) = run_command(&graph.query(), &graph, &config) {
        eprintln!("command failed: {err}");
        process::exit(1);
    }
}

fn open_graph(config: &CommandLineConfig) -> Result<BuildingGraph, String> {
    if config.database == "memory" {
        BuildingGraph::open_in_memory().map_err(|e| e.to_string())
    } else {
        let path = PathBuf::from(&config.database);
        BuildingGraph::open(path).map_err(|e| e.to_string())
    }
}

fn run_command(
    engine: &QueryEngine<'_, BuildingGraph>,
    graph: &BuildingGraph,
    config: &CommandLineConfig,
) -> Result<(), BuildingGraphError> {
    match config.command.as_str() {
        "status" => {
            println!("backend=sqlite elements={}", graph.element_count()?);
            Ok(())
        }
        "metadata" => {
            let metadata = engine.graph_metadata()?;
            println!("elements={}", metadata.total_elements);
            for (element_type, count) in &metadata.element_counts {
                println!("  {element_type}: {count}");
            }
            println!("relations={}", metadata.total_relations);
            for (kind, count) in &metadata.relation_counts {
                println!("  {kind}: {count}");
            }
            Ok(())
        }
        "stats" => {
            let root = required(config.id.as_deref(), "--id")?;
            let stats = engine.element_statistics(root)?;
            for (element_type, count) in &stats.counts {
                println!("{element_type}: {count}");
            }
            println!("total_area_sqm: {}", stats.total_area);
            Ok(())
        }
        "descendants" => {
            let root = required(config.id.as_deref(), "--id")?;
            for element in engine.descendants(root, config.depth)? {
                println!("{}:{} ({})", element.id, element.name, element.element_type);
            }
            Ok(())
        }
        "rooms" => {
            let room = required(config.id.as_deref(), "--id")?;
            for element in engine.connected_rooms(room)? {
                println!("{}:{}", element.id, element.name);
            }
            Ok(())
        }
        "path" => {
            let from = required(config.from.as_deref(), "--from")?;
            let to = required(config.to.as_deref(), "--to")?;
            match engine.find_path(from, to)? {
                Some(path) => {
                    for element in path {
                        println!("-> {} ({})", element.name, element.element_type);
                    }
                }
                None => println!("no path from '{from}' to '{to}'"),
            }
            Ok(())
        }
        other => {
            println!("unknown command {other}, defaulting to status");
            println!("backend=sqlite elements={}", graph.element_count()?);
            Ok(())
        }
    }
}

fn required<'a>(value: Option<&'a str>, flag: &str) -> Result<&'a str, BuildingGraphError> {
    value.ok_or_else(|| BuildingGraphError::invalid_argument(format!("{flag} is required")))
}
