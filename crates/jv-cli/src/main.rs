use clap::{Args as ClapArgs, Parser, Subcommand};
use jv_core::{Entry, JsonValue, Locator, Value};
use std::path::PathBuf;
use std::rc::Rc;

mod files;

#[derive(Parser, Debug)]
#[command(
    name = "jv",
    about = "Query and edit JSON files: find, filter, aggregate, push and replace",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print a file, or every .json file below a directory as one mapping
    Dump(DumpArgs),
    /// Print one element by index or key
    Get(GetArgs),
    /// List indexes/keys whose value (or --field of it) equals --equals
    Find(MatchArgs),
    /// Keep only entries whose value (or --field of it) equals --equals
    Filter(FilterArgs),
    /// Average of the numeric values (or --field of each value)
    Avg(SelectArgs),
    /// Median of the numeric values (or --field of each value)
    Median(SelectArgs),
    /// Push raw JSON onto the payload (concat, merge or append)
    Push(PushArgs),
    /// Replace one element by index or key with raw JSON
    Replace(ReplaceArgs),
}

#[derive(ClapArgs, Debug)]
struct DumpArgs {
    /// File or directory to dump
    path: PathBuf,
    /// Pretty-print the output
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(ClapArgs, Debug)]
struct GetArgs {
    /// JSON file to load
    path: PathBuf,
    /// Index (sequence) or key (mapping)
    #[arg(long)]
    at: String,
}

#[derive(ClapArgs, Debug)]
struct SelectArgs {
    /// JSON file to load
    path: PathBuf,
    /// Look at this field of each value instead of the value itself
    #[arg(long)]
    field: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct MatchArgs {
    #[command(flatten)]
    select: SelectArgs,
    /// Raw JSON to compare against (e.g. 3, "on", {"a":1})
    #[arg(long)]
    equals: String,
}

#[derive(ClapArgs, Debug)]
struct OutputArgs {
    /// Output .json path to write; otherwise prints to stdout
    #[arg(long)]
    out: Option<PathBuf>,
    /// Copy an existing --out file to <stem>_<timestamp>.json before overwriting
    #[arg(long, default_value_t = false)]
    backup: bool,
}

#[derive(ClapArgs, Debug)]
struct FilterArgs {
    #[command(flatten)]
    matching: MatchArgs,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(ClapArgs, Debug)]
struct PushArgs {
    /// JSON file to load
    path: PathBuf,
    /// Raw JSON to push
    #[arg(long)]
    value: String,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(ClapArgs, Debug)]
struct ReplaceArgs {
    /// JSON file to load
    path: PathBuf,
    /// Index (sequence) or key (mapping)
    #[arg(long)]
    at: String,
    /// Raw JSON to store
    #[arg(long)]
    value: String,
    #[command(flatten)]
    output: OutputArgs,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Dump(a) => cmd_dump(a),
        Cmd::Get(a) => cmd_get(a),
        Cmd::Find(a) => cmd_find(a),
        Cmd::Filter(a) => cmd_filter(a),
        Cmd::Avg(a) => cmd_avg(a),
        Cmd::Median(a) => cmd_median(a),
        Cmd::Push(a) => cmd_push(a),
        Cmd::Replace(a) => cmd_replace(a),
    }
}

fn load_or_exit(path: &std::path::Path) -> JsonValue {
    files::load(path).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(2);
    })
}

fn parse_raw_or_exit(flag: &str, raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        eprintln!("invalid --{} JSON: {}", flag, e);
        std::process::exit(3);
    })
}

// The value a selector/matcher looks at: the entry itself or one of its fields
fn selected<'a>(e: &Entry<'a>, field: Option<&str>) -> Option<&'a Value> {
    match field {
        Some(f) => e.value().get(f),
        None => Some(e.value()),
    }
}

// Mappings take --at verbatim as a key, so numeric keys still work
fn locate(v: &JsonValue, raw: &str) -> Locator {
    if v.is_mapping() {
        return Locator::Key(raw.to_string());
    }
    let Ok(at) = raw.parse::<Locator>();
    at
}

fn emit(value: &Value, output: &OutputArgs) {
    match &output.out {
        Some(path) => files::write(path, value, output.backup).unwrap_or_else(|e| {
            eprintln!("error writing: {}", e);
            std::process::exit(5);
        }),
        None => println!("{}", files::render(value, true)),
    }
}

fn stdout_sink() -> jv_core::Sink {
    Rc::new(|v: &Value| println!("{}", files::render(v, true)))
}

fn cmd_dump(args: DumpArgs) {
    let p = args.path.as_path();
    let v = if p.is_file() {
        load_or_exit(p)
    } else if p.is_dir() {
        files::load_dir(p)
    } else {
        eprintln!("error: not found: {}", p.display());
        std::process::exit(2);
    };
    println!("{}", files::render(&Value::from(&v), args.pretty));
}

fn cmd_get(args: GetArgs) {
    let v = load_or_exit(&args.path).with_sink(stdout_sink());
    let at = locate(&v, &args.at);
    let Some(x) = v.get(&at) else {
        eprintln!("not found: {}", args.at);
        std::process::exit(3);
    };
    // `print` treats index 0 and "" as the whole payload
    if at.is_truthy() {
        v.print(Some(&at));
    } else {
        println!("{}", files::render(x, true));
    }
}

fn cmd_find(args: MatchArgs) {
    let v = load_or_exit(&args.select.path);
    let want = parse_raw_or_exit("equals", &args.equals);
    let field = args.select.field.as_deref();
    match v.find_all_indexes(|e| selected(&e, field) == Some(&want)) {
        Some(found) => {
            for l in found {
                println!("{}", l);
            }
        }
        None => {
            eprintln!("no match");
            std::process::exit(1);
        }
    }
}

fn cmd_filter(args: FilterArgs) {
    let v = load_or_exit(&args.matching.select.path);
    let want = parse_raw_or_exit("equals", &args.matching.equals);
    let field = args.matching.select.field.as_deref();
    let kept = v.filter(|e| selected(&e, field) == Some(&want));
    emit(&Value::from(kept), &args.output);
}

fn cmd_avg(args: SelectArgs) {
    let v = load_or_exit(&args.path);
    let field = args.field.as_deref();
    println!("{}", v.average(|e| selected(&e, field).and_then(Value::as_f64)));
}

fn cmd_median(args: SelectArgs) {
    let v = load_or_exit(&args.path);
    let field = args.field.as_deref();
    let mid: Vec<Value> = v
        .median(|e| selected(&e, field).and_then(Value::as_f64))
        .into_iter()
        .map(|n| n.map(Value::from).unwrap_or(Value::Null))
        .collect();
    println!("{}", files::render(&Value::Array(mid), false));
}

fn cmd_push(args: PushArgs) {
    let mut v = load_or_exit(&args.path);
    let addition = parse_raw_or_exit("value", &args.value);
    if let Err(e) = v.push(addition) {
        eprintln!("error: {}", e);
        std::process::exit(4);
    }
    emit(&Value::from(&v), &args.output);
}

fn cmd_replace(args: ReplaceArgs) {
    let mut v = load_or_exit(&args.path);
    let at = locate(&v, &args.at);
    let new_val = parse_raw_or_exit("value", &args.value);
    if let Err(e) = v.replace(&at, new_val) {
        eprintln!("error: {}", e);
        std::process::exit(4);
    }
    emit(&Value::from(&v), &args.output);
}
