//! Integration tests for sw-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, SNAPSHOT_HEADER, SUMMARY_HEADER};
    use crate::row::{AgentSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            tick,
            agent_id,
            form:        1,
            real_x:      agent_id as f64 + 0.5,
            real_y:      2.25,
            perceived_x: 0.0,
            perceived_y: 0.0,
            localized:   agent_id % 2 == 0,
            inside_true: false,
        }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            population:       300,
            localized:        160,
            inside_estimated: 40,
            inside_true:      38,
            culled:           0,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("agent_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_missing_directory_is_created() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("agent_snapshots.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, SNAPSHOT_HEADER);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, SUMMARY_HEADER);
    }

    #[test]
    fn csv_snapshot_rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = vec![snap_row(0, 5), snap_row(1, 5), snap_row(2, 5)];
        w.write_snapshots(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 3);
        assert_eq!(&read_rows[0][0], "5");        // tick
        assert_eq!(&read_rows[0][1], "0");        // agent_id
        assert_eq!(&read_rows[0][2], "1");        // form
        assert_eq!(&read_rows[1][3], "1.500000"); // real_x
        assert_eq!(&read_rows[1][4], "2.250000"); // real_y
        assert_eq!(&read_rows[0][7], "1");        // localized
        assert_eq!(&read_rows[1][7], "0");
        assert_eq!(&read_rows[2][1], "2");
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 1);
        let fields: Vec<&str> = read_rows[0].iter().collect();
        assert_eq!(fields, ["3", "300", "160", "40", "38", "0"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use sw_behavior::NoopBehavior;
    use sw_core::{SwarmConfig, Vec2};
    use sw_sim::{SimBuilder, SimObserver, TickSummary};

    use crate::{
        AgentSnapshotRow, CsvWriter, OutputError, OutputResult, OutputWriter,
        SimOutputObserver, TickSummaryRow,
    };

    /// Accepts nothing: every write fails.
    struct Broken {
        attempts: usize,
    }

    impl OutputWriter for Broken {
        fn write_snapshots(&mut self, _rows: &[AgentSnapshotRow]) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other(format!("write {}", self.attempts))))
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other(format!("write {}", self.attempts))))
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = SimOutputObserver::new(Broken { attempts: 0 });
        obs.on_tick_end(&TickSummary::default());
        obs.on_tick_end(&TickSummary::default());

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("write 1"), "{err}");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().attempts, 2);
    }

    #[test]
    fn integration_csv() {
        let dir: TempDir = tempfile::tempdir().unwrap();
        let config = SwarmConfig {
            snapshot_interval_ticks: 5,
            ..SwarmConfig::default().with_population(3).with_total_ticks(10)
        };
        let placements = vec![
            (Vec2::new(10.0, 10.0), true),
            (Vec2::new(20.0, 10.0), false),
            (Vec2::new(30.0, 10.0), true),
        ];
        let mut sim = SimBuilder::new(config, NoopBehavior)
            .placements(placements)
            .build()
            .unwrap();

        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        // Snapshots after 0, 5 and 10 completed ticks, three bugs each.
        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 9);
        let ticks: Vec<&str> = rows.iter().map(|r| r.get(0).unwrap()).collect();
        assert_eq!(ticks, ["0", "0", "0", "5", "5", "5", "10", "10", "10"]);
        assert_eq!(&rows[1][5], "0.000000"); // lost bug's perceived_x

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 10);
        assert_eq!(&summaries[9][0], "9");
        assert_eq!(&summaries[9][1], "3"); // population
        assert_eq!(&summaries[9][2], "2"); // localized anchors
    }
}
