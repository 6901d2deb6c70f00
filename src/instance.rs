use std::io::BufRead;
use std::str::SplitWhitespace;
use std::error::Error;
use itertools::Itertools;

/// A set cover instance: candidate sets and the elements they should cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub sets: Vec<Vec<usize>>,
    pub elements: Vec<usize>, // without duplicates, in order of appearance
}

impl Instance {
    pub fn new(sets: Vec<Vec<usize>>, elements: Vec<usize>) -> Instance {
        Instance { sets, elements: elements.into_iter().unique().collect() }
    }

    /// Builds an instance whose elements are all members of the given sets.
    pub fn from_sets(sets: Vec<Vec<usize>>) -> Instance {
        let elements = sets.iter().flatten().cloned().unique().collect();
        Instance { sets, elements }
    }

    pub fn new_from_stdin() -> Result<Instance, Box<dyn Error>> {
        Instance::from_reader(std::io::stdin().lock())
    }

    /// Reads an instance in the line format
    ///
    /// ```text
    /// c a comment
    /// u 1 2 3 4
    /// s 1 2
    /// s 3 4
    /// ```
    ///
    /// `u` lines list elements to cover, `s` lines one candidate set each. Without any `u`
    /// line, every element of every set has to be covered.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Instance, Box<dyn Error>> {
        let mut sets: Vec<Vec<usize>> = Vec::new();
        let mut elements: Option<Vec<usize>> = None;
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let mut ll = line.split_whitespace();
            match ll.next() {
                None | Some("c") => {} // skip blank lines and comments
                Some("u") => elements.get_or_insert_with(Vec::new).extend(parse_elements(ll, lineno)?),
                Some("s") => sets.push(parse_elements(ll, lineno)?),
                Some(other) => return Err(From::from(format!("c Line {}: unknown line type {:?}. Abort!", lineno + 1, other))),
            }
        }
        match elements {
            Some(elements) => Ok(Instance::new(sets, elements)),
            None if sets.is_empty() => Err(From::from("c Failed to parse an instance! Maybe the input was empty?")),
            None => Ok(Instance::from_sets(sets)),
        }
    }
}

fn parse_elements(ll: SplitWhitespace<'_>, lineno: usize) -> Result<Vec<usize>, Box<dyn Error>> {
    let mut set = Vec::new();
    for x in ll {
        match x.parse::<usize>() {
            Ok(e) => set.push(e),
            Err(e) => return Err(From::from(format!("c Line {}: bad element {:?}: {}", lineno + 1, x, e))),
        }
    }
    Ok(set)
}
