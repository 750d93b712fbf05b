use integ_tests::invalid;

invalid!(bare_value, "a = hello", @"<string>:1:5: unexpected character found: `h`");
invalid!(unquoted_bool, "a = truely", @"<string>:1:5: invalid TOML value, did you mean to use a quoted string?");
invalid!(missing_equals, "a 1", @"<string>:1:3: expected an equals, found an identifier");
invalid!(missing_value, "a = \n", @r"<string>:1:5: unexpected character found: `\n`");
invalid!(key_without_value, "\n\nkey", @"<string>:3:4: unterminated key value pair");
invalid!(two_values, "a = 1 2", @"<string>:1:7: expected newline, found an identifier");
invalid!(unterminated_string, "a = 1\nb = \"x", @"<string>:2:7: unterminated string");
invalid!(string_over_newline, "a = 'x\ny'", @"<string>:1:7: unterminated string");
invalid!(bad_escape, r#"a = "\q""#, @"<string>:1:7: invalid escape character in string: `q`");
invalid!(bad_hex_escape, r#"a = "\u00g0""#, @"<string>:1:10: invalid hex escape character in string: `g`");
invalid!(surrogate_escape, r#"a = "\ud800""#, @"<string>:1:8: invalid escape value: `0xd800`");
invalid!(truncated_escape, r#"a = "\u00"#, @"<string>:1:10: truncated unicode escape");
invalid!(double_underscore, "a = 1__0", @"<string>:1:5: invalid number");
invalid!(double_dot, "a = 1.2.3", @"<string>:1:5: invalid number");
invalid!(integer_overflow, "a = 9223372036854775808", @"<string>:1:5: out of range of 'i64'");
invalid!(bad_month, "a = 1979-13-01", @"<string>:1:5: invalid date or time");
invalid!(array_missing_comma, "a = [1 2]", @"<string>:1:8: expected a comma or `]`, found an identifier");
invalid!(unterminated_array, "a = [1,\n2,\n", @"<string>:3:1: unterminated array");
invalid!(inline_table_newline, "a = { b = 1\n}", @"<string>:1:12: expected a comma or `}`, found a newline");
invalid!(unclosed_header, "[a\nb = 1", @"<string>:1:3: expected a right bracket, found a newline");
invalid!(unclosed_array_header, "[[a]\n", @"<string>:1:4: expected `]]`, found a right bracket");
invalid!(empty_header, "[]\n", @"<string>:1:1: empty table name");
invalid!(multiline_key, "\"\"\"a\"\"\" = 1", @"<string>:1:1: multiline strings are not allowed for key");
invalid!(header_through_scalar, "a = 1\n[a.b]\n", @"<string>:2:1: key `a` is not a table");
invalid!(array_header_on_table, "[a]\n[[a]]\n", @"<string>:2:1: this key was not an array: `a`");
invalid!(dotted_through_scalar, "a = 'x'\na.b = 1\n", @"<string>:2:1: key `a` is not a table");
invalid!(stray_bracket, "a = 1\n]", @"<string>:2:1: unexpected character found: `]`");
invalid!(lone_carriage_return, "a = 1\rb = 2", @"<string>:1:7: expected newline, found an identifier");
