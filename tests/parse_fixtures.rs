//! Integration tests against captured real-world feeds.
//!
//! The documents below are trimmed copies of feeds as they were served, warts
//! included: XML prologs and stylesheets, namespaced vendor tags, doubly
//! escaped entities, CDATA with surrounding whitespace.

use chrono::{TimeZone, Utc};
use feedscan::{parse_document, Enclosure, Entry, Feed, ParseError};
use pretty_assertions::assert_eq;

// ============================================================================
// Fixtures
// ============================================================================

const SUTTERS_MILL: &str = r##"
<rss xmlns:content="http://purl.org/rss/1.0/modules/content/" xmlns:wfw="http://wellformedweb.org/CommentAPI/" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:sy="http://purl.org/rss/1.0/modules/syndication/" xmlns:slash="http://purl.org/rss/1.0/modules/slash/" xmlns:georss="http://www.georss.org/georss" xmlns:geo="http://www.w3.org/2003/01/geo/wgs84_pos#" xmlns:media="http://search.yahoo.com/mrss/" version="2.0">
<channel>
<title>Sutter's Mill</title>
<atom:link href="http://herbsutter.com/feed/" rel="self" type="application/rss+xml"/>
<link>http://herbsutter.com</link>
<description>Herb Sutter on software, hardware, and concurrency</description>
<lastBuildDate>Wed, 21 Aug 2013 00:57:11 +0000</lastBuildDate>
<language>en</language>
<sy:updatePeriod>hourly</sy:updatePeriod>
<sy:updateFrequency>1</sy:updateFrequency>
<generator>http://wordpress.com/</generator>
<image>
<url>
http://0.gravatar.com/blavatar/4554b8d24c7f200dc5e2e1b18db1893f?s=96&d=http%3A%2F%2Fs2.wp.com%2Fi%2Fbuttonw-com.png
</url>
<title>Sutter's Mill</title>
<link>http://herbsutter.com</link>
</image>
<item>
<title>
GotW #7b: Minimizing Compile-Time Dependencies, Part 2
</title>
<link>
http://herbsutter.com/2013/08/19/gotw-7b-minimizing-compile-time-dependencies-part-2/
</link>
<comments>
http://herbsutter.com/2013/08/19/gotw-7b-minimizing-compile-time-dependencies-part-2/#comments
</comments>
<pubDate>Mon, 19 Aug 2013 10:33:12 +0000</pubDate>
<dc:creator>Herb Sutter</dc:creator>
<category>
<![CDATA[ GotW ]]>
</category>
<guid isPermaLink="false">http://herbsutter.com/?p=2294</guid>
<description>
<![CDATA[
Now that the unnecessary headers have been removed, it&#8217;s time for Phase 2: How can you limit dependencies on the internals of a class? Problem JG Questions 1. What does private mean for a class member in C++? 2. Why does changing the private members of a type cause a recompilation? Guru Question 3. Below [&#8230;]<img alt="" border="0" src="http://stats.wordpress.com/b.gif?host=herbsutter.com&#038;blog=3379246&#038;post=2294&#038;subd=herbsutter&#038;ref=&#038;feed=1" width="1" height="1" />
]]>
</description>
<content:encoded>
<![CDATA[
<p><span style="color:#5a5a5a;"><em>Now that the unnecessary headers have been removed, it&#8217;s time for Phase 2: How can you limit dependencies on the internals of a class?</em></span> </p> <h1>Problem<br /> </h1> <h2>JG Questions<br /> </h2> <p>1. What does <span style="color:#2e74b5;">private</span> mean for a class member in C++? </p> <p>2. Why does changing the private members of a type cause a recompilation? </p> <h2>Guru Question<br /> </h2> <p>3. Below is how the header from the previous Item looks after the initial cleanup pass. What further <span style="color:#2e74b5;">#include</span>s could be removed if we made some suitable changes, and how? </p> ...
]]>
</content:encoded>
<wfw:commentRss>
http://herbsutter.com/2013/08/19/gotw-7b-minimizing-compile-time-dependencies-part-2/feed/
</wfw:commentRss>
<slash:comments>8</slash:comments>
</item>
</channel>
</rss>"##;

const SUTTERS_MILL_SUMMARY: &str = r##"
Now that the unnecessary headers have been removed, it&#8217;s time for Phase 2: How can you limit dependencies on the internals of a class? Problem JG Questions 1. What does private mean for a class member in C++? 2. Why does changing the private members of a type cause a recompilation? Guru Question 3. Below [&#8230;]<img alt="" border="0" src="http://stats.wordpress.com/b.gif?host=herbsutter.com&#038;blog=3379246&#038;post=2294&#038;subd=herbsutter&#038;ref=&#038;feed=1" width="1" height="1" />
"##;

const SUTTERS_MILL_CONTENT: &str = r##"
<p><span style="color:#5a5a5a;"><em>Now that the unnecessary headers have been removed, it&#8217;s time for Phase 2: How can you limit dependencies on the internals of a class?</em></span> </p> <h1>Problem<br /> </h1> <h2>JG Questions<br /> </h2> <p>1. What does <span style="color:#2e74b5;">private</span> mean for a class member in C++? </p> <p>2. Why does changing the private members of a type cause a recompilation? </p> <h2>Guru Question<br /> </h2> <p>3. Below is how the header from the previous Item looks after the initial cleanup pass. What further <span style="color:#2e74b5;">#include</span>s could be removed if we made some suitable changes, and how? </p> ...
"##;

const ERIC_LIPPERT: &str = r##"
<?xml version="1.0" encoding="UTF-8" ?>
<?xml-stylesheet type="text/xsl" href="http://blogs.msdn.com/utility/FeedStylesheets/rss.xsl" media="screen"?><rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:slash="http://purl.org/rss/1.0/modules/slash/" xmlns:wfw="http://wellformedweb.org/CommentAPI/">
<channel>
<title>Fabulous Adventures In Coding</title>
<link>http://blogs.msdn.com/b/ericlippert/</link>
<description>Eric Lippert&amp;#39;s Erstwhile Blog</description>
<dc:language>en-US</dc:language>
<item>
<title>A new fabulous adventure</title>
<link>http://blogs.msdn.com/b/ericlippert/archive/2012/11/29/a-new-fabulous-adventure.aspx</link>
<pubDate>Thu, 29 Nov 2012 15:00:00 GMT</pubDate>
<guid isPermaLink="false">91d46819-8472-40ad-a661-2c78acb4018c:10369420</guid>
<dc:creator>Eric Lippert</dc:creator>
<slash:comments>48</slash:comments>
<comments>http://blogs.msdn.com/b/ericlippert/archive/2012/11/29/a-new-fabulous-adventure.aspx#comments</comments>
<description>&lt;div class="mine"&gt;
&lt;p&gt;Tomorrow, the 30th of November, 2012, is the first day of my fifth decade here on Earth, and my last day at Microsoft. (*)&lt;/p&gt;
&lt;p&gt;(*) That timing is not coincidental.&lt;/p&gt;
</description>
</item>
</channel>
</rss>"##;

const PROGRAMMING_REDDIT: &str = r##"
<?xml version="1.0" encoding="UTF-8"?><rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:media="http://search.yahoo.com/mrss/" xmlns:atom="http://www.w3.org/2005/Atom"><channel><title>programming</title><link>http://www.reddit.com/r/programming/</link><description>Computer Programming</description><image><url>http://static.reddit.com/reddit_programming.png</url><title>programming</title><link>http://www.reddit.com/r/programming/</link></image><atom:link rel="self" href="http://www.reddit.com/r/programming/.rss" type="application/rss+xml" /><item><title>Which browsers crash the most?</title><link>http://www.reddit.com/r/programming/comments/1kuw60/which_browsers_crash_the_most/</link><guid isPermaLink="true">http://www.reddit.com/r/programming/comments/1kuw60/which_browsers_crash_the_most/</guid><pubDate>Thu, 22 Aug 2013 05:48:56 +0000</pubDate><description>submitted by &lt;a href=&#34;http://www.reddit.com/user/nnethercote&#34;&gt; nnethercote &lt;/a&gt; &lt;br/&gt; &lt;a href=&#34;http://sauceio.com/index.php/2013/08/the-surprising-worst-browser-the-reboot/&#34;&gt;[link]&lt;/a&gt; &lt;a href="http://www.reddit.com/r/programming/comments/1kuw60/which_browsers_crash_the_most/"&gt;[12 comments]&lt;/a&gt;</description></item></channel></rss>"##;

const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Feed</title>
  <subtitle>A subtitle.</subtitle>
  <link href="http://example.org/" />
  <updated>2003-12-13T18:30:02Z</updated>
  <author>
    <name>John Doe</name>
  </author>
  <icon>http://example.org/favicon.ico</icon>
  <entry>
    <title>Atom-Powered Robots Run Amok</title>
    <link href="http://example.org/2003/12/13/atom03" />
    <id>urn:uuid:1225c695-cfb8-4ebb-aaaa-80da344efa6a</id>
    <updated>2003-12-13T18:30:02Z</updated>
    <summary>Some text.</summary>
    <content type="html">&lt;p&gt;Robots &amp;amp; more&lt;/p&gt;</content>
  </entry>
  <entry>
    <title>Second</title>
    <published>2003-12-14T09:00:00+01:00</published>
  </entry>
</feed>"#;

// ============================================================================
// Captured Feeds
// ============================================================================

#[test]
fn test_condensed_channel() {
    let doc = r#"<rss>
  <channel>
    <atom:link rel="s" />
    <item>
      <title>t</title>
      <link>l</link>
      <description>desc</description>
    </item>
  </channel>
</rss>"#;

    let parsed = parse_document("condensed", doc).unwrap();
    assert_eq!(parsed.feed, Feed::default());
    assert_eq!(
        parsed.entries,
        vec![Entry {
            title: Some("t".to_string()),
            link: Some("l".to_string()),
            summary: Some("desc".to_string()),
            ..Default::default()
        }]
    );
}

#[test]
fn test_sutters_mill() {
    let parsed = parse_document("Sutter's Mill", SUTTERS_MILL).unwrap();

    assert_eq!(
        parsed.feed,
        Feed {
            title: Some("Sutter's Mill".to_string()),
            link: Some("http://herbsutter.com".to_string()),
            subtitle: Some("Herb Sutter on software, hardware, and concurrency".to_string()),
            generator: Some("http://wordpress.com/".to_string()),
            ..Default::default()
        }
    );

    assert_eq!(
        parsed.entries,
        vec![Entry {
            title: Some("GotW #7b: Minimizing Compile-Time Dependencies, Part 2\n".to_string()),
            link: Some(
                "http://herbsutter.com/2013/08/19/gotw-7b-minimizing-compile-time-dependencies-part-2/\n"
                    .to_string()
            ),
            guid: Some("http://herbsutter.com/?p=2294".to_string()),
            updated: Some(Utc.with_ymd_and_hms(2013, 8, 19, 10, 33, 12).unwrap()),
            summary: Some(SUTTERS_MILL_SUMMARY.to_string()),
            content: Some(SUTTERS_MILL_CONTENT.to_string()),
            // `<slash:comments>` comes after `<comments>` and wins.
            comments: Some("8".to_string()),
            ..Default::default()
        }]
    );
}

#[test]
fn test_eric_lippert() {
    let parsed = parse_document("Eric Lippert", ERIC_LIPPERT).unwrap();

    assert_eq!(
        parsed.feed,
        Feed {
            title: Some("Fabulous Adventures In Coding".to_string()),
            link: Some("http://blogs.msdn.com/b/ericlippert/".to_string()),
            // Decoded exactly once.
            subtitle: Some("Eric Lippert&#39;s Erstwhile Blog".to_string()),
            ..Default::default()
        }
    );

    let url = "http://blogs.msdn.com/b/ericlippert/archive/2012/11/29/a-new-fabulous-adventure.aspx";
    assert_eq!(
        parsed.entries,
        vec![Entry {
            title: Some("A new fabulous adventure".to_string()),
            link: Some(url.to_string()),
            guid: Some("91d46819-8472-40ad-a661-2c78acb4018c:10369420".to_string()),
            updated: Some(Utc.with_ymd_and_hms(2012, 11, 29, 15, 0, 0).unwrap()),
            summary: Some(
                "<div class=\"mine\">\n<p>Tomorrow, the 30th of November, 2012, is the first day of my fifth decade here on Earth, and my last day at Microsoft. (*)</p>\n<p>(*) That timing is not coincidental.</p>\n"
                    .to_string()
            ),
            comments: Some(format!("{url}#comments")),
            ..Default::default()
        }]
    );
}

#[test]
fn test_programming_reddit() {
    let parsed = parse_document("Programming Reddit", PROGRAMMING_REDDIT).unwrap();

    assert_eq!(
        parsed.feed,
        Feed {
            title: Some("programming".to_string()),
            link: Some("http://www.reddit.com/r/programming/".to_string()),
            subtitle: Some("Computer Programming".to_string()),
            ..Default::default()
        }
    );

    let url = "http://www.reddit.com/r/programming/comments/1kuw60/which_browsers_crash_the_most/";
    assert_eq!(
        parsed.entries,
        vec![Entry {
            title: Some("Which browsers crash the most?".to_string()),
            link: Some(url.to_string()),
            guid: Some(url.to_string()),
            updated: Some(Utc.with_ymd_and_hms(2013, 8, 22, 5, 48, 56).unwrap()),
            summary: Some(format!(
                "submitted by <a href=\"http://www.reddit.com/user/nnethercote\"> nnethercote </a> <br/> <a href=\"http://sauceio.com/index.php/2013/08/the-surprising-worst-browser-the-reboot/\">[link]</a> <a href=\"{url}\">[12 comments]</a>"
            )),
            ..Default::default()
        }]
    );
}

#[test]
fn test_atom_document() {
    let parsed = parse_document("atom", ATOM).unwrap();

    assert_eq!(
        parsed.feed,
        Feed {
            title: Some("Example Feed".to_string()),
            subtitle: Some("A subtitle.".to_string()),
            author: Some("John Doe".to_string()),
            icon: Some("http://example.org/favicon.ico".to_string()),
            ..Default::default()
        }
    );

    assert_eq!(parsed.entries.len(), 2);
    let first = &parsed.entries[0];
    assert_eq!(first.title.as_deref(), Some("Atom-Powered Robots Run Amok"));
    // Atom links carry the URL in an attribute and no text.
    assert_eq!(first.link, None);
    assert_eq!(
        first.guid.as_deref(),
        Some("urn:uuid:1225c695-cfb8-4ebb-aaaa-80da344efa6a")
    );
    assert_eq!(
        first.updated,
        Some(Utc.with_ymd_and_hms(2003, 12, 13, 18, 30, 2).unwrap())
    );
    assert_eq!(first.summary.as_deref(), Some("Some text."));
    assert_eq!(first.content.as_deref(), Some("<p>Robots &amp; more</p>"));

    let second = &parsed.entries[1];
    assert_eq!(second.title.as_deref(), Some("Second"));
    assert_eq!(
        second.updated,
        Some(Utc.with_ymd_and_hms(2003, 12, 14, 8, 0, 0).unwrap())
    );
    assert!(second.enclosure.is_empty());
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_two_items_with_vendor_tags_and_comment() {
    let doc = r#"<?xml version="1.0"?>
<rss version="2.0" xmlns:slash="http://purl.org/rss/1.0/modules/slash/">
<channel>
<title>Scenario</title>
<!-- note -->
<item>
<title>First</title>
<slash:comments>8</slash:comments>
</item>
<item>
<title>Second</title>
<!-- note -->
<pubDate>Mon, 19 Aug 2013 10:33:12 +0000</pubDate>
<enclosure length="123" type="audio/mpeg" url="http://x/a.mp3"/>
</item>
</channel>
</rss>"#;

    let parsed = parse_document("scenario", doc).unwrap();
    assert_eq!(parsed.feed.title.as_deref(), Some("Scenario"));
    assert_eq!(parsed.feed.published, None);
    assert_eq!(parsed.entries.len(), 2);

    assert_eq!(parsed.entries[0].comments.as_deref(), Some("8"));
    assert_eq!(parsed.entries[0].updated, None);

    assert_eq!(parsed.entries[1].comments, None);
    assert_eq!(
        parsed.entries[1].updated,
        Some(Utc.with_ymd_and_hms(2013, 8, 19, 10, 33, 12).unwrap())
    );
    assert_eq!(
        parsed.entries[1].enclosure,
        Enclosure {
            length: Some("123".to_string()),
            mime_type: Some("audio/mpeg".to_string()),
            url: Some("http://x/a.mp3".to_string()),
        }
    );

    let json = serde_json::to_string(&parsed).unwrap();
    assert!(!json.contains("note"));
}

#[test]
fn test_fatal_error_reports_document_and_line() {
    let doc = "<rss>\n<channel>\n<title>ok</title>\n<item><ti&tle>x</ti&tle></item>\n";
    // `&` is a legal name character to the scanner, so this one parses.
    assert!(parse_document("lenient", doc).is_ok());

    let doc = "<rss>\n<channel>\n<title>ok</title>\n<item>\n<bad attr></item>";
    let err = parse_document("broken.xml", doc).unwrap_err();
    match &err {
        ParseError::Malformed { name, line, .. } => {
            assert_eq!(name, "broken.xml");
            assert_eq!(*line, 5);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("broken.xml:5:"));
}

#[test]
fn test_feed_without_items_has_no_entries() {
    let parsed = parse_document(
        "empty",
        "<rss><channel><title>Quiet</title><description>Nothing yet</description></channel></rss>",
    )
    .unwrap();
    assert_eq!(parsed.feed.title.as_deref(), Some("Quiet"));
    assert_eq!(parsed.feed.subtitle.as_deref(), Some("Nothing yet"));
    assert!(parsed.entries.is_empty());
}
