use std::error::Error;
use std::fmt;
use std::io::BufRead;

#[derive(Debug)]
pub enum GenotypeError {
    ShapeMismatch { maternal: (usize, usize), paternal: (usize, usize) },
    Ragged { row: usize, expected: usize, found: usize },
    Parse { line: usize, token: String },
    Io(std::io::Error),
}

impl fmt::Display for GenotypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenotypeError::ShapeMismatch { maternal, paternal } => write!(
                f,
                "maternal genotypes are {}x{} but paternal genotypes are {}x{}",
                maternal.0, maternal.1, paternal.0, paternal.1
            ),
            GenotypeError::Ragged { row, expected, found } => {
                write!(f, "row {} has {} loci, expected {}", row, found, expected)
            }
            GenotypeError::Parse { line, token } => write!(f, "line {}: not a genotype: {:?}", line, token),
            GenotypeError::Io(e) => write!(f, "{}", e),
        }
    }
}

impl Error for GenotypeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GenotypeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GenotypeError {
    fn from(e: std::io::Error) -> Self {
        GenotypeError::Io(e)
    }
}

/// Genotypes of a group of people at a common list of loci.
///
/// Row `i` of both matrices belongs to person `i`, column `j` to locus `j`.
#[derive(Debug, Clone)]
pub struct Genotypes {
    pub maternal: Vec<Vec<i64>>,
    pub paternal: Vec<Vec<i64>>,
    heterozygotes: Vec<Vec<usize>>,
}

impl Genotypes {
    pub fn new(maternal: Vec<Vec<i64>>, paternal: Vec<Vec<i64>>) -> Result<Genotypes, GenotypeError> {
        let m = shape(&maternal)?;
        let p = shape(&paternal)?;
        if m != p {
            return Err(GenotypeError::ShapeMismatch { maternal: m, paternal: p });
        }
        let heterozygotes = maternal
            .iter()
            .zip(paternal.iter())
            .map(|(xm, xp)| (0..xm.len()).filter(|&j| xm[j] != xp[j]).collect())
            .collect();
        Ok(Genotypes { maternal, paternal, heterozygotes })
    }

    pub fn len(&self) -> usize {
        self.maternal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maternal.is_empty()
    }

    /// The `i`-th entry holds the loci at which person `i` is heterozygous, in increasing order.
    pub fn heterozygote_loci(&self) -> &[Vec<usize>] {
        &self.heterozygotes
    }
}

fn shape(x: &[Vec<i64>]) -> Result<(usize, usize), GenotypeError> {
    let cols = x.first().map_or(0, |row| row.len());
    for (row, r) in x.iter().enumerate() {
        if r.len() != cols {
            return Err(GenotypeError::Ragged { row, expected: cols, found: r.len() });
        }
    }
    Ok((x.len(), cols))
}

/// Reads a whitespace separated genotype matrix, one person per line, ignoring the first
/// `skip_rows` lines and blank lines. Values like `1.0` are accepted as long as they are
/// integral.
pub fn read_matrix<R: BufRead>(reader: R, skip_rows: usize) -> Result<Vec<Vec<i64>>, GenotypeError> {
    let mut matrix = Vec::new();
    for (lineno, line) in reader.lines().enumerate().skip(skip_rows) {
        let line = line?;
        let row = line
            .split_whitespace()
            .map(|token| parse_genotype(token).ok_or_else(|| GenotypeError::Parse { line: lineno + 1, token: token.to_string() }))
            .collect::<Result<Vec<i64>, GenotypeError>>()?;
        if !row.is_empty() {
            matrix.push(row);
        }
    }
    Ok(matrix)
}

fn parse_genotype(token: &str) -> Option<i64> {
    if let Ok(v) = token.parse::<i64>() {
        return Some(v);
    }
    let v = token.parse::<f64>().ok()?;
    (v.fract() == 0.0 && v.is_finite()).then(|| v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heterozygous_where_parents_differ() {
        let g = Genotypes::new(vec![vec![0, 1, 0], vec![1, 1, 0]], vec![vec![0, 1, 1], vec![0, 1, 1]]).unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.heterozygote_loci().to_vec(), vec![vec![2usize], vec![0, 2]]);
    }

    #[test]
    fn shapes_must_agree() {
        let err = Genotypes::new(vec![vec![0, 1]], vec![vec![0, 1], vec![1, 1]]).unwrap_err();
        assert!(matches!(err, GenotypeError::ShapeMismatch { maternal: (1, 2), paternal: (2, 2) }));
        let err = Genotypes::new(vec![vec![0, 1], vec![1]], vec![vec![0, 1], vec![1, 1]]).unwrap_err();
        assert!(matches!(err, GenotypeError::Ragged { row: 1, expected: 2, found: 1 }));
    }

    #[test]
    fn reads_matrix_with_header() {
        let text = "10 11 12\n0 1 2\n\n1.0 1 0e0\n";
        let m = read_matrix(text.as_bytes(), 1).unwrap();
        assert_eq!(m, vec![vec![0, 1, 2], vec![1, 1, 0]]);
        assert!(matches!(read_matrix("0 a\n".as_bytes(), 0), Err(GenotypeError::Parse { line: 1, .. })));
        assert!(read_matrix("0.5\n".as_bytes(), 0).is_err());
    }
}
