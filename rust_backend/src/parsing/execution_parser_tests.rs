#[cfg(test)]
mod tests {
    use crate::config::KpiConfig;
    use crate::core::domain::Weekday;
    use crate::error::KpiError;
    use crate::parsing::execution_parser::parse_executions;
    use crate::parsing::table::RawTable;
    use chrono::NaiveDate;

    const LOG_HEADERS: [&str; 8] = [
        "Début",
        "Fin",
        "Parcours",
        "Durée\r\n[mn]",
        "Surface\r\npropre [mq]",
        "Vitesse moyenne [km/h]",
        "Productivité\r\nhoraire [mq/h]",
        "Terminer\r\nà [%]",
    ];

    fn log_table(rows: &[Vec<&str>]) -> RawTable {
        RawTable::from_strings(&LOG_HEADERS, rows).unwrap()
    }

    /// Test parsing a complete row with decimal commas
    #[test]
    fn test_parse_full_row() {
        let table = log_table(&[vec![
            "15/01/2024 06:30",
            "15/01/2024 07:30",
            " Hall A ",
            "60",
            "1250,5",
            "3,2",
            "1250,5",
            "95",
        ]]);

        let load = parse_executions(&table, &KpiConfig::default()).unwrap();
        assert_eq!(load.records.len(), 1);
        assert_eq!(load.coerced_cells, 0);

        let record = &load.records[0];
        assert_eq!(
            record.start_time,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(6, 30, 0)
        );
        assert_eq!(record.weekday, Some(Weekday::Monday));
        assert_eq!(record.calendar_week, Some(3));
        assert_eq!(record.route_name, "Hall A");
        assert_eq!(record.duration_minutes, Some(60.0));
        assert_eq!(record.area_cleaned_sqm, Some(1250.5));
        assert_eq!(record.avg_speed_kmh, Some(3.2));
        assert_eq!(record.productivity_sqm_per_h, Some(1250.5));
        assert_eq!(record.completion_pct, Some(95.0));
    }

    /// Test that unparsable cells are coerced to None without dropping the row
    #[test]
    fn test_unparsable_cells_coerced() {
        let table = log_table(&[vec![
            "not a date",
            "",
            "Hall A",
            "abc",
            "100",
            "",
            "x",
            "90,0",
        ]]);

        let load = parse_executions(&table, &KpiConfig::default()).unwrap();
        assert_eq!(load.records.len(), 1);
        assert_eq!(load.coerced_cells, 3);

        let record = &load.records[0];
        assert_eq!(record.start_time, None);
        assert_eq!(record.weekday, None);
        assert_eq!(record.calendar_week, None);
        assert_eq!(record.end_time, None);
        assert_eq!(record.duration_minutes, None);
        assert_eq!(record.area_cleaned_sqm, Some(100.0));
        assert_eq!(record.avg_speed_kmh, None);
        assert_eq!(record.productivity_sqm_per_h, None);
        assert_eq!(record.completion_pct, Some(90.0));
    }

    /// Test that optional columns may be absent
    #[test]
    fn test_optional_columns_missing() {
        let table = RawTable::from_strings(
            &["start_time", "route"],
            &[vec!["16/01/2024 08:00", "Quai 2"]],
        )
        .unwrap();

        let load = parse_executions(&table, &KpiConfig::default()).unwrap();
        let record = &load.records[0];
        assert_eq!(record.weekday, Some(Weekday::Tuesday));
        assert_eq!(record.duration_minutes, None);
        assert_eq!(record.completion_pct, None);
    }

    /// Test that a missing route column is a structural error
    #[test]
    fn test_missing_route_column() {
        let table = RawTable::from_strings(&["Début", "Durée [mn]"], &[]).unwrap();
        let result = parse_executions(&table, &KpiConfig::default());
        assert!(matches!(result, Err(KpiError::MissingColumn(ref c)) if c == "route"));
    }

    /// Test that a missing start column is a structural error
    #[test]
    fn test_missing_start_column() {
        let table = RawTable::from_strings(&["Parcours"], &[]).unwrap();
        let result = parse_executions(&table, &KpiConfig::default());
        assert!(matches!(result, Err(KpiError::MissingColumn(ref c)) if c == "start_time"));
    }

    /// Test that configured aliases take effect
    #[test]
    fn test_custom_aliases() {
        let mut config = KpiConfig::default();
        config.columns.route = vec!["circuit".to_string()];
        config.ingest.timestamp_formats = vec!["%Y-%m-%d %H:%M".to_string()];

        let table = RawTable::from_strings(
            &["Start", "Circuit"],
            &[vec!["2024-01-21 22:15", "Parking"]],
        )
        .unwrap();

        let load = parse_executions(&table, &config).unwrap();
        let record = &load.records[0];
        assert_eq!(record.route_name, "Parking");
        assert_eq!(record.weekday, Some(Weekday::Sunday));
        assert_eq!(record.calendar_week, Some(3));
    }
}
