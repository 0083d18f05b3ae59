/// Splits `shape` into its batch part and its trailing `event_dim` axes.
pub fn split_event(shape: &[i64], event_dim: usize) -> (&[i64], &[i64]) {
    shape.split_at(shape.len().saturating_sub(event_dim))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_event() {
        let (batch, event) = split_event(&[4, 2, 3], 1);
        assert_eq!(batch, &[4, 2]);
        assert_eq!(event, &[3]);

        let (batch, event) = split_event(&[3], 2);
        assert!(batch.is_empty());
        assert_eq!(event, &[3]);
    }
}
