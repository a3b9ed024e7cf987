use std::fs;
use std::path::Path;

use postdump::{extract_posts, Config, CsvStore, DatasetJob, Post, Registry};

fn repeat(c: char, n: usize) -> String {
    std::iter::repeat(c).take(n).collect()
}

fn write_dump(dir: &Path, name: &str, rows: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(
        &path,
        format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<posts>\n{}</posts>\n",
            rows
        ),
    )
    .unwrap();
    path
}

fn read_csv(path: &Path) -> Vec<Post> {
    csv::Reader::from_path(path)
        .unwrap()
        .deserialize()
        .collect::<Result<Vec<Post>, _>>()
        .unwrap()
}

#[test]
fn three_rows_two_qualify() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let rows = format!(
        "  <row Id=\"1\" Title=\"A\" Body=\"&lt;p&gt;short&lt;/p&gt;\" />\n  \
         <row Id=\"2\" Title=\"\" Body=\"&lt;p&gt;{}&lt;/p&gt;\" />\n  \
         <row Id=\"3\" Body=\"&lt;b&gt;{}&lt;/b&gt;\" />\n",
        repeat('x', 60),
        repeat('y', 60)
    );
    let xml = write_dump(dir.path(), "Posts.xml", &rows);

    let posts = extract_posts(&xml, 10)?;
    assert_eq!(
        posts,
        vec![
            Post {
                id: Some("2".to_string()),
                text: repeat('x', 60)
            },
            Post {
                id: Some("3".to_string()),
                text: repeat('y', 60)
            },
        ]
    );

    let dest = CsvStore::new(dir.path().join("csv")).write("out.csv", &posts)?;
    let written = fs::read_to_string(&dest)?;
    assert_eq!(
        written,
        format!("id,text\n2,{}\n3,{}\n", repeat('x', 60), repeat('y', 60))
    );
    Ok(())
}

#[test]
fn csv_round_trip_keeps_embedded_separators() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let rows = "  <row Id=\"10\" Title=\"Commas, &quot;quotes&quot; and lines\" \
                Body=\"&lt;p&gt;first paragraph, with a comma&lt;/p&gt;&lt;pre&gt;line one&#10;line two&lt;/pre&gt;\" />\n  \
                <row Title=\"No id here but the title alone is long enough to qualify\" Body=\"&lt;i&gt;body&lt;/i&gt;\" />\n";
    let xml = write_dump(dir.path(), "Posts.xml", rows);

    let posts = extract_posts(&xml, 1000)?;
    assert_eq!(posts.len(), 2);
    assert_eq!(
        posts[0].text,
        "Commas, \"quotes\" and lines. first paragraph, with a comma line one\nline two"
    );
    assert_eq!(posts[1].id, None);

    let dest = CsvStore::new(dir.path()).write("round_trip.csv", &posts)?;
    assert_eq!(read_csv(&dest), posts);
    Ok(())
}

#[test]
fn cutoff_keeps_first_qualifying_rows() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let rows: String = (0..30)
        .map(|i| {
            let body = if i % 3 == 0 {
                "tiny".to_string()
            } else {
                format!("post number {} {}", i, repeat('w', 50))
            };
            format!("  <row Id=\"{}\" Body=\"{}\" />\n", i, body)
        })
        .collect();
    let xml = write_dump(dir.path(), "Posts.xml", &rows);

    let posts = extract_posts(&xml, 4)?;
    let ids: Vec<_> = posts.iter().filter_map(|p| p.id.as_deref()).collect();
    assert_eq!(ids, vec!["1", "2", "4", "5"]);
    assert!(posts.iter().all(|p| p.text.chars().count() > 50));
    Ok(())
}

#[test]
fn registry_writes_every_dataset() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let body = repeat('b', 80);
    let first = write_dump(
        dir.path(),
        "first.xml",
        &format!("<row Id=\"1\" Body=\"{}\" />", body),
    );
    let second = write_dump(
        dir.path(),
        "second.xml",
        &format!("<row Id=\"1\" Body=\"{b}\" /><row Id=\"2\" Body=\"{b}\" />", b = body),
    );
    let out = dir.path().join("csv_datasets").join("original_csv");
    let config = Config::builder().output_dir(&out).build();

    let mut status = Vec::new();
    let reports = Registry::new(vec![
        DatasetJob::new("first_raw.csv", &first),
        DatasetJob::new("second_raw.csv", &second),
    ])
    .run_with_status(&config, &mut status)?;

    assert_eq!(
        String::from_utf8(status)?,
        format!(
            "Saved 1 posts to {}\nSaved 2 posts to {}\n",
            out.join("first_raw.csv").display(),
            out.join("second_raw.csv").display()
        )
    );

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].count, 1);
    assert_eq!(reports[1].count, 2);
    assert_eq!(reports[1].destination, out.join("second_raw.csv"));
    assert_eq!(read_csv(&out.join("second_raw.csv")).len(), 2);
    Ok(())
}

#[test]
fn failing_job_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_dump(
        dir.path(),
        "good.xml",
        &format!("<row Id=\"1\" Body=\"{}\" />", repeat('g', 70)),
    );
    let broken = dir.path().join("broken.xml");
    fs::write(&broken, "<posts><row Id=\"1\"></posts>").unwrap();
    let out = dir.path().join("out");
    let config = Config::builder().output_dir(&out).build();

    let err = Registry::new(vec![
        DatasetJob::new("good.csv", &good),
        DatasetJob::new("broken.csv", &broken),
        DatasetJob::new("never.csv", &good),
    ])
    .run(&config)
    .unwrap_err();

    assert!(format!("{:?}", err).contains("broken.xml"));
    assert!(out.join("good.csv").exists());
    assert!(!out.join("broken.csv").exists());
    assert!(!out.join("never.csv").exists());
}

#[test]
fn missing_dump_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::builder().output_dir(dir.path()).build();
    let job = DatasetJob::new("missing.csv", dir.path().join("nope").join("Posts.xml"));
    assert!(job.run(&config).is_err());
    assert!(!dir.path().join("missing.csv").exists());
}
