pub(crate) const COMMON_QUESTIONS: &[&str] = &[
    "Explain Arithmetic operators with example",
    "Explain Python List Methods",
    "Explain string methods",
    "What is a dictionary in Python? Explain its key features...",
    "Write a Python program to count character frequency...",
    "What are classes and objects in Python? Explain with examples",
    "What is a function in Python? Explain advantages with example",
    "What's Data Science Pipeline?",
    "Data Science Pipeline",
    "Explain Data Science Pipeline with neat diagram",
    "Explain applications of data science",
    "Explain data science and AI",
    "What Is Data Visualization? Explain plot types",
    "Explain Data Visualization? Explain plots",
    "Explain Data Visualization. Types of Plots",
    "What is data visualization? Importance?",
    "What Is Matplotlib? Explain box/pie plot",
    "Scatter plot example",
    "Explain scatter plot with program",
    "Explain Histogram with example?",
    "Short note: histogram, boxplot, directed/undirected graph",
    "Explain pie chart",
    "Difference between bar, line, pie chart?",
    "Explain central tendency & variance",
    "Mean, median, mode with example",
    "What is coefficient of correlation?",
    "Coefficient of correlation with example",
    "What is a Contingency Table?",
    "Explain EDA",
    "Exploratory Data Analysis",
    "EDA types & steps",
    "What is Data Wrangling?",
    "Wrangling of Data",
    "Data wrangling process",
    "Arithmetic operators",
];

pub(crate) const UNIQUE_QUESTIONS: &[&str] = &[
    "What is data science? What is Python? Features?",
    "Role of data types in Python. Explain list methods",
    "What is a string? slicing, concatenation, repetition",
    "Difference: list vs tuple",
    "Define tuple, immutability",
    "Program: Pass/Fail",
    "Program: set union, intersection, difference",
    "Difference: discard(), remove(), clear(), del",
    "Core skills for data scientist",
    "How data science, big data, AI work together?",
    "How programming improves data analysis?",
    "Python vs IPython",
    "Magic functions in IPython",
    "Program: arithmetic operators + magic",
    "What is IPython? Features?",
    "Short note: Magic, Jupyter, Checkpoint",
    "Magic methods & operator overloading",
    "Comparison operators using magic methods",
    "Attribute access methods",
    "What is kernel? Types? Why restart?",
    "Load Seaborn built-in dataset",
    "Program: line chart",
    "Factors for choosing a graph",
    "Program: pie chart",
    "Explain timeplot",
    "Role of hashing in wrangling",
    "What is benchmarking?",
    "Hashing trick program",
];
