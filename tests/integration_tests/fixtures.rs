//! Test fixtures for integration tests
//!
//! Sample topic proportion tables in the CSV layout an LDA export produces.

/// Two documents per year, 2000..=2007; `rise` grows, `fall` shrinks,
/// `flat` and `steady` never change
pub const SAMPLE_DOC_TOPICS_CSV: &str = "\
id,year,rise,fall,flat,steady
d01,2000,0.10,0.50,0.05,0.35
d02,2000,0.12,0.48,0.05,0.35
d03,2001,0.14,0.46,0.05,0.35
d04,2001,0.16,0.44,0.05,0.35
d05,2002,0.18,0.42,0.05,0.35
d06,2002,0.20,0.40,0.05,0.35
d07,2003,0.22,0.38,0.05,0.35
d08,2003,0.24,0.36,0.05,0.35
d09,2004,0.26,0.34,0.05,0.35
d10,2004,0.28,0.32,0.05,0.35
d11,2005,0.30,0.30,0.05,0.35
d12,2005,0.32,0.28,0.05,0.35
d13,2006,0.34,0.26,0.05,0.35
d14,2006,0.36,0.24,0.05,0.35
d15,2007,0.38,0.22,0.05,0.35
d16,2007,0.40,0.20,0.05,0.35
";

/// Only three years of data
pub const SHORT_DOC_TOPICS_CSV: &str = "\
id,year,topic_1,topic_2
a,2010,0.2,0.8
b,2011,0.3,0.7
c,2012,0.4,0.6
";

/// No year column at all
pub const NO_YEAR_CSV: &str = "\
id,date,topic_1
a,2010-01-01,0.2
";

/// A year cell that is not a number
pub const BAD_YEAR_CSV: &str = "\
id,year,topic_1
a,2010,0.2
b,twenty-eleven,0.3
";

/// Years given out of order, with rows sharing a year
pub const UNORDERED_DOC_TOPICS_CSV: &str = "\
year,id,t1
2003,x,0.4
2001,y,0.2
2002,z,0.3
2001,w,0.4
2000,v,0.1
";
