use anyhow::{bail, Context, Result};
use bucketcover::genotype::{read_matrix, Genotypes};
use bucketcover::{set_cover_greedy_with, CoverStatus, Instance, SetCoverOptions};
use itertools::Itertools;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

enum Source {
    Stdin,
    Genotypes {
        maternal: PathBuf,
        paternal: PathBuf,
        skip_rows: usize,
        loci: Option<Vec<usize>>,
    },
}

fn usage() -> ! {
    eprintln!(
        "usage: bucketcover [--verbose] [--quiet] < instance\n       bucketcover [--verbose] [--quiet] --genotypes <maternal> <paternal> [--loci 1,4,18] [--skip-rows 1]"
    );
    std::process::exit(1);
}

fn parse_args() -> Result<(Source, SetCoverOptions)> {
    let mut options = SetCoverOptions {
        verbose: env::var("BUCKETCOVER_VERBOSE").map_or(false, |v| v != "0" && !v.is_empty()),
        quiet: false,
    };
    let mut genotypes: Option<(PathBuf, PathBuf)> = None;
    let mut skip_rows = 1;
    let mut loci = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => options.verbose = true,
            "--quiet" => options.quiet = true,
            "--genotypes" => {
                let maternal = args.next().unwrap_or_else(|| usage());
                let paternal = args.next().unwrap_or_else(|| usage());
                genotypes = Some((PathBuf::from(maternal), PathBuf::from(paternal)));
            }
            "--skip-rows" => {
                let n = args.next().unwrap_or_else(|| usage());
                skip_rows = n.parse().with_context(|| format!("invalid --skip-rows {:?}", n))?;
            }
            "--loci" => {
                let list = args.next().unwrap_or_else(|| usage());
                let parsed = list
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(|s| s.trim().parse::<usize>())
                    .collect::<Result<Vec<_>, _>>()
                    .with_context(|| format!("invalid --loci {:?}", list))?;
                loci = Some(parsed);
            }
            "-h" | "--help" => usage(),
            other => bail!("unknown argument {:?}", other),
        }
    }
    let source = match genotypes {
        Some((maternal, paternal)) => Source::Genotypes { maternal, paternal, skip_rows, loci },
        None if loci.is_some() => bail!("--loci requires --genotypes"),
        None => Source::Stdin,
    };
    Ok((source, options))
}

fn load_matrix(path: &Path, skip_rows: usize) -> Result<Vec<Vec<i64>>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_matrix(BufReader::new(file), skip_rows).with_context(|| format!("failed to read genotypes from {}", path.display()))
}

fn load(source: Source, verbose: bool) -> Result<Instance> {
    match source {
        Source::Stdin => Instance::new_from_stdin().map_err(|e| anyhow::anyhow!("{}", e)),
        Source::Genotypes { maternal, paternal, skip_rows, loci } => {
            if verbose {
                eprintln!("c reading genotypes from {} and {}", maternal.display(), paternal.display());
            }
            let people = Genotypes::new(load_matrix(&maternal, skip_rows)?, load_matrix(&paternal, skip_rows)?)?;
            let sets = people.heterozygote_loci().to_vec();
            Ok(match loci {
                Some(loci) => Instance::new(sets, loci),
                None => Instance::from_sets(sets),
            })
        }
    }
}

fn main() -> Result<()> {
    let (source, options) = parse_args()?;
    let instance = load(source, options.verbose)?;
    let cover = set_cover_greedy_with(&instance.sets, instance.elements.iter().cloned(), &options);
    for i in &cover.indices {
        println!("{}", i);
    }
    if let CoverStatus::Partial { uncovered, .. } = &cover.status {
        println!("c uncovered: {}", uncovered.iter().join(" "));
    }
    Ok(())
}
