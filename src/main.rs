use anyhow::{bail, Result};
use itertools::Itertools;
use tracing::{debug, Level};

use rusty_thrift::thrift::{
    self, make_cell_from_text, parse_timestamp, tree::RecordNode, CellFlag, Hql,
};

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1).collect_vec();
    let verbose = match args.iter().position(|a| a == "--verbose") {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    };
    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let Some((command, rest)) = args.split_first() else {
        bail!("Missing <command>");
    };
    debug!(%command, ?rest, "dispatching");

    match command.as_str() {
        ".auto" => println!("{}", thrift::AUTO_ASSIGN),
        ".ts" => match rest {
            [text] => println!("{}", parse_timestamp(text)?),
            _ => bail!("usage: .ts <timestamp>"),
        },
        ".cell" => {
            let (row, column, value, ts, rev) = match rest {
                [row, column, value] => (row, column, value, None, None),
                [row, column, value, ts] => (row, column, value, Some(ts), None),
                [row, column, value, ts, rev] => (row, column, value, Some(ts), Some(rev)),
                _ => bail!("usage: .cell <row> <family[:qualifier]> <value> [timestamp] [revision]"),
            };
            let (family, qualifier) = match column.split_once(':') {
                Some((family, qualifier)) => (family, Some(qualifier)),
                None => (column.as_str(), None),
            };
            let cell = make_cell_from_text(
                row,
                family,
                qualifier,
                value,
                ts.map(String::as_str),
                rev.map(String::as_str),
                CellFlag::Insert,
            )?;
            println!("{cell}");
        }
        ".tree" => {
            if rest.is_empty() {
                bail!("Missing <hql>");
            }
            let hql = Hql::parse(rest.join(" "))?;
            RecordNode::from(&hql).pretty_print()?;
        }
        _ => {
            let hql = Hql::parse(args.join(" "))?;
            match hql {
                Hql::Select { ref scan_spec, .. } => println!("{scan_spec}"),
                insert => println!("{}", insert.into_result()),
            }
        }
    }

    Ok(())
}
