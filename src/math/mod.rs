// Conventions:
// blocks are (time x frequency) views, rows are time samples and columns
// are frequency channels
// indexing is always row,column, represented in i,j

// Flagged values are NaNs (or 0 when the stage is asked to fill with zeros)

pub mod mask;
pub mod mean;
pub mod quantile;
