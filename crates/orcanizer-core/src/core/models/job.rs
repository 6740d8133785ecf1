/// One unit of batch work: a molecule identifier paired with the slot id that names its files.
///
/// Jobs are never persisted. The slot id must be unique within a batch run, otherwise two jobs
/// would overwrite each other's input and output files.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Job {
    pub identifier: String,
    pub slot_id: usize,
}

impl Job {
    pub fn new(identifier: impl Into<String>, slot_id: usize) -> Self {
        Self {
            identifier: identifier.into(),
            slot_id,
        }
    }

    /// Pairs each identifier with its position in the sequence.
    pub fn enumerate<I, S>(identifiers: I) -> impl Iterator<Item = Job>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        identifiers
            .into_iter()
            .enumerate()
            .map(|(slot_id, identifier)| Job::new(identifier, slot_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerate_assigns_sequential_slot_ids() {
        let jobs: Vec<Job> = Job::enumerate(["CCO", "c1ccccc1", "O"]).collect();
        assert_eq!(
            jobs,
            vec![
                Job::new("CCO", 0),
                Job::new("c1ccccc1", 1),
                Job::new("O", 2),
            ]
        );
    }

    #[test]
    fn enumerate_of_empty_sequence_is_empty() {
        let jobs: Vec<Job> = Job::enumerate(Vec::<String>::new()).collect();
        assert!(jobs.is_empty());
    }
}
